use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{AnalysisPayload, AnswerAttempt, AttemptStatus},
};

#[async_trait]
pub trait AttemptRepository: Send + Sync {
    async fn create(&self, attempt: AnswerAttempt) -> AppResult<AnswerAttempt>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<AnswerAttempt>>;
    /// All attempts of a session, oldest first.
    async fn find_by_session(&self, session_id: &str) -> AppResult<Vec<AnswerAttempt>>;
    /// Attempts created at or after `since`, newest first.
    async fn find_since(
        &self,
        since: DateTime<Utc>,
        status: Option<AttemptStatus>,
    ) -> AppResult<Vec<AnswerAttempt>>;
    async fn record_score(
        &self,
        id: &str,
        risk_score: u8,
        analysis: Option<AnalysisPayload>,
        status: AttemptStatus,
    ) -> AppResult<()>;
    /// Overwrites the analysis payload of every attempt in the session.
    async fn update_session_analysis(
        &self,
        session_id: &str,
        analysis: AnalysisPayload,
    ) -> AppResult<u64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoAttemptRepository {
    collection: Collection<AnswerAttempt>,
}

impl MongoAttemptRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl AttemptRepository for MongoAttemptRepository {
    async fn create(&self, attempt: AnswerAttempt) -> AppResult<AnswerAttempt> {
        self.collection.insert_one(&attempt).await?;
        Ok(attempt)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<AnswerAttempt>> {
        let attempt = self.collection.find_one(doc! { "id": id }).await?;
        Ok(attempt)
    }

    async fn find_by_session(&self, session_id: &str) -> AppResult<Vec<AnswerAttempt>> {
        let attempts = self
            .collection
            .find(doc! { "session_id": session_id })
            .sort(doc! { "created_at": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }

    async fn find_since(
        &self,
        since: DateTime<Utc>,
        status: Option<AttemptStatus>,
    ) -> AppResult<Vec<AnswerAttempt>> {
        let mut filter = doc! { "created_at": { "$gte": since.timestamp_millis() } };

        if let Some(status) = status {
            filter.insert("status", status.to_string());
        }

        let attempts = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }

    async fn record_score(
        &self,
        id: &str,
        risk_score: u8,
        analysis: Option<AnalysisPayload>,
        status: AttemptStatus,
    ) -> AppResult<()> {
        let analysis = match analysis {
            Some(payload) => mongodb::bson::to_bson(&payload)?,
            None => mongodb::bson::Bson::Null,
        };

        let result = self
            .collection
            .update_one(
                doc! { "id": id },
                doc! {
                    "$set": {
                        "risk_score": risk_score as i32,
                        "analysis": analysis,
                        "status": status.to_string(),
                        "completed_at": Utc::now().timestamp_millis(),
                    }
                },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("Attempt with id '{}' not found", id)));
        }

        Ok(())
    }

    async fn update_session_analysis(
        &self,
        session_id: &str,
        analysis: AnalysisPayload,
    ) -> AppResult<u64> {
        let analysis = mongodb::bson::to_bson(&analysis)?;

        let result = self
            .collection
            .update_many(
                doc! { "session_id": session_id },
                doc! { "$set": { "analysis": analysis } },
            )
            .await?;

        Ok(result.modified_count)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for attempts collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let session_index = IndexModel::builder()
            .keys(doc! { "session_id": 1, "created_at": 1 })
            .options(
                IndexOptions::builder()
                    .name("session_created".to_string())
                    .build(),
            )
            .build();

        let created_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(session_index).await?;
        self.collection.create_index(created_index).await?;

        log::info!("Successfully created indexes for attempts collection");
        Ok(())
    }
}

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use proctor_server::{
    errors::{AppError, AppResult},
    models::domain::{AnalysisPayload, AnswerAttempt, AttemptStatus, Question},
    repositories::{AttemptRepository, QuestionRepository},
    services::judgment_service::{CompletionProvider, CompletionRequest, JudgmentError},
};

#[derive(Default)]
pub struct InMemoryAttemptRepository {
    attempts: Arc<RwLock<HashMap<String, AnswerAttempt>>>,
}

impl InMemoryAttemptRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttemptRepository for InMemoryAttemptRepository {
    async fn create(&self, attempt: AnswerAttempt) -> AppResult<AnswerAttempt> {
        let mut attempts = self.attempts.write().await;
        if attempts.contains_key(&attempt.id) {
            return Err(AppError::AlreadyExists(format!(
                "Attempt with id '{}' already exists",
                attempt.id
            )));
        }

        attempts.insert(attempt.id.clone(), attempt.clone());
        Ok(attempt)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<AnswerAttempt>> {
        let attempts = self.attempts.read().await;
        Ok(attempts.get(id).cloned())
    }

    async fn find_by_session(&self, session_id: &str) -> AppResult<Vec<AnswerAttempt>> {
        let attempts = self.attempts.read().await;
        let mut items: Vec<_> = attempts
            .values()
            .filter(|a| a.session_id == session_id)
            .cloned()
            .collect();
        items.sort_by_key(|a| a.created_at);
        Ok(items)
    }

    async fn find_since(
        &self,
        since: DateTime<Utc>,
        status: Option<AttemptStatus>,
    ) -> AppResult<Vec<AnswerAttempt>> {
        let attempts = self.attempts.read().await;
        let mut items: Vec<_> = attempts
            .values()
            .filter(|a| a.created_at >= since)
            .filter(|a| status.map_or(true, |s| a.status == s))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn record_score(
        &self,
        id: &str,
        risk_score: u8,
        analysis: Option<AnalysisPayload>,
        status: AttemptStatus,
    ) -> AppResult<()> {
        let mut attempts = self.attempts.write().await;
        let attempt = attempts
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Attempt with id '{}' not found", id)))?;

        attempt.risk_score = Some(risk_score);
        attempt.analysis = analysis;
        attempt.status = status;
        attempt.completed_at = Some(Utc::now());
        Ok(())
    }

    async fn update_session_analysis(
        &self,
        session_id: &str,
        analysis: AnalysisPayload,
    ) -> AppResult<u64> {
        let mut attempts = self.attempts.write().await;
        let mut updated = 0;
        for attempt in attempts.values_mut().filter(|a| a.session_id == session_id) {
            attempt.analysis = Some(analysis.clone());
            updated += 1;
        }
        Ok(updated)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuestionRepository {
    questions: Arc<RwLock<HashMap<i32, Question>>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn find_all(&self) -> AppResult<Vec<Question>> {
        let questions = self.questions.read().await;
        let mut items: Vec<_> = questions.values().cloned().collect();
        items.sort_by_key(|q| q.id);
        Ok(items)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Question>> {
        let questions = self.questions.read().await;
        Ok(questions.get(&id).cloned())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.questions.read().await.len() as u64)
    }

    async fn insert_many(&self, items: Vec<Question>) -> AppResult<usize> {
        let mut questions = self.questions.write().await;
        for question in &items {
            if questions.contains_key(&question.id) {
                return Err(AppError::AlreadyExists(format!(
                    "Question with id '{}' already exists",
                    question.id
                )));
            }
        }

        let inserted = items.len();
        for question in items {
            questions.insert(question.id, question);
        }
        Ok(inserted)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Replies to every completion with the same canned result.
pub struct ScriptedProvider {
    reply: Result<String, JudgmentError>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn replying(content: &str) -> Self {
        Self {
            reply: Ok(content.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: JudgmentError) -> Self {
        Self {
            reply: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, JudgmentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

/// Polls until the attempt carries a score or the deadline passes.
pub async fn wait_for_score(repo: &dyn AttemptRepository, id: &str) -> AnswerAttempt {
    for _ in 0..200 {
        if let Ok(Some(attempt)) = repo.find_by_id(id).await {
            if attempt.risk_score.is_some() {
                return attempt;
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("attempt {} was never scored", id);
}

pub fn test_config() -> proctor_server::config::Config {
    proctor_server::config::Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "proctor-test".to_string(),
        mongo_max_pool_size: 4,
        mongo_min_pool_size: 1,
        mongo_timeout_secs: 2,
        attempts_collection: "test_attempts".to_string(),
        questions_collection: "questions".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8080,
        openai_api_key: None,
        openai_api_base: None,
        openai_model: proctor_server::config::DEFAULT_JUDGMENT_MODEL.to_string(),
        status_window_minutes: 10,
        seed_questions: true,
        cors_allowed_origin: None,
    }
}

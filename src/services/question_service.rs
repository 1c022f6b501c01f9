use std::sync::Arc;

use crate::{
    db::seed::seed_questions,
    errors::AppResult,
    models::domain::Question,
    repositories::QuestionRepository,
};

pub struct QuestionService {
    repository: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_questions(&self) -> AppResult<Vec<Question>> {
        self.repository.find_all().await
    }

    /// Inserts the default test when the store is empty. Returns how many
    /// questions were added.
    pub async fn seed_if_empty(&self) -> AppResult<usize> {
        if self.repository.count().await? > 0 {
            log::info!("Question store already populated, skipping seed");
            return Ok(0);
        }

        let inserted = self.repository.insert_many(seed_questions()).await?;
        log::info!("Seeded {} questions", inserted);
        Ok(inserted)
    }
}

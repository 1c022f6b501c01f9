use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        AttemptRepository, MongoAttemptRepository, MongoQuestionRepository, QuestionRepository,
    },
    services::{
        attempt_service::AttemptService,
        judgment_service::{CompletionProvider, JudgmentService, OpenAiCompletionProvider},
        question_service::QuestionService,
        risk_analyzer::RiskAnalyzer,
        scoring_queue::ScoringQueue,
        session_aggregator::SessionAggregator,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub question_service: Arc<QuestionService>,
    pub attempt_service: Arc<AttemptService>,
    pub session_aggregator: Arc<SessionAggregator>,
    pub scoring_queue: ScoringQueue,
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let attempt_repository = Arc::new(MongoAttemptRepository::new(
            &db,
            &config.attempts_collection,
        ));
        attempt_repository.ensure_indexes().await?;

        let question_repository = Arc::new(MongoQuestionRepository::new(
            &db,
            &config.questions_collection,
        ));
        question_repository.ensure_indexes().await?;

        let provider = Arc::new(OpenAiCompletionProvider::new(&config));

        let state = Self::with_components(
            config,
            attempt_repository,
            question_repository,
            provider,
            Some(db),
        );

        if state.config.seed_questions {
            state.question_service.seed_if_empty().await?;
        }

        Ok(state)
    }

    /// Wires services over the given storage and provider and starts the
    /// scoring worker. Must be called from within a tokio runtime.
    pub fn with_components(
        config: Config,
        attempts: Arc<dyn AttemptRepository>,
        questions: Arc<dyn QuestionRepository>,
        provider: Arc<dyn CompletionProvider>,
        db: Option<Database>,
    ) -> Self {
        let judgment = Arc::new(JudgmentService::new(provider, config.openai_model.clone()));

        let analyzer = Arc::new(RiskAnalyzer::new(
            Arc::clone(&attempts),
            Arc::clone(&questions),
            Arc::clone(&judgment),
        ));
        let scoring_queue = ScoringQueue::start(analyzer);

        let attempt_service = Arc::new(AttemptService::new(
            Arc::clone(&attempts),
            Arc::clone(&questions),
            scoring_queue.clone(),
            config.status_window_minutes,
        ));
        let session_aggregator = Arc::new(SessionAggregator::new(
            Arc::clone(&attempts),
            Arc::clone(&questions),
            judgment,
        ));
        let question_service = Arc::new(QuestionService::new(questions));

        Self {
            question_service,
            attempt_service,
            session_aggregator,
            scoring_queue,
            db,
            config: Arc::new(config),
        }
    }
}

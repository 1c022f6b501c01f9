pub mod attempt_service;
pub mod judgment_service;
pub mod question_service;
pub mod risk_analyzer;
pub mod scoring;
pub mod scoring_queue;
pub mod session_aggregator;

pub mod answer_attempt;
pub mod behavior_log;
pub mod judgment;
pub mod question;
pub mod session_report;
pub use answer_attempt::{AnalysisPayload, AnswerAttempt, AttemptStatus};
pub use behavior_log::BehaviorLog;
pub use judgment::JudgmentResult;
pub use question::{Difficulty, Question, QuestionType};
pub use session_report::{BehaviorTotals, RiskLevel, SessionReport};

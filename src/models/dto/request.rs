use serde::Deserialize;
use validator::Validate;

use crate::models::domain::BehaviorLog;

fn default_use_judgment() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerRequest {
    #[validate(length(min = 1, max = 100))]
    pub session_id: String,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub student_name: String,

    #[validate(range(min = 1))]
    pub question_id: i32,

    #[validate(length(min = 1, max = 10000))]
    pub answer: String,

    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub answer_time: f64,

    #[serde(default)]
    pub behavior_logs: BehaviorLog,

    #[serde(default = "default_use_judgment", alias = "useLLM")]
    pub use_judgment: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FinalAnalysisRequest {
    #[validate(length(min = 1, max = 100))]
    pub session_id: String,

    #[serde(default = "default_use_judgment", alias = "useLLM")]
    pub use_judgment: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
    pub since: Option<i64>, // epoch milliseconds
}

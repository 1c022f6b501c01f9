use serde::Serialize;

use crate::models::domain::{AttemptStatus, BehaviorTotals, SessionReport};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerResponse {
    pub attempt_id: String,
    pub message: String,
}

/// One row of the reviewer dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub session_id: String,
    pub student_name: String,
    pub current_question: usize,
    pub total_questions: usize,
    pub risk_score: u8,
    pub average_risk_score: u8,
    pub status: AttemptStatus,
    pub warnings: Vec<String>,
    pub accuracy: u8,
    pub final_report: Option<String>,
    pub elapsed_time: i64, // seconds since the latest attempt
    pub last_activity: i64, // epoch milliseconds
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalAnalysisResponse {
    pub accuracy: u8,
    pub avg_risk_score: u8,
    pub total_behavior: BehaviorTotals,
    pub report: String,
}

impl From<SessionReport> for FinalAnalysisResponse {
    fn from(report: SessionReport) -> Self {
        FinalAnalysisResponse {
            accuracy: report.accuracy,
            avg_risk_score: report.avg_risk_score,
            total_behavior: report.total_behavior,
            report: report.final_report,
        }
    }
}

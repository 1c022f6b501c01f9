use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{
    behavior_log::BehaviorLog, judgment::JudgmentResult, session_report::SessionReport,
};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AnswerAttempt {
    pub id: String,
    pub session_id: String,
    pub student_name: String,
    pub question_id: i32,
    pub answer: String,
    pub answer_time: f64, // seconds
    pub behavior_log: BehaviorLog,
    pub risk_score: Option<u8>,
    pub analysis: Option<AnalysisPayload>,
    pub status: AttemptStatus,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    InProgress,
    Completed,
    Flagged,
}

impl std::fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptStatus::InProgress => write!(f, "in_progress"),
            AttemptStatus::Completed => write!(f, "completed"),
            AttemptStatus::Flagged => write!(f, "flagged"),
        }
    }
}

impl std::str::FromStr for AttemptStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "in_progress" => Ok(AttemptStatus::InProgress),
            "completed" => Ok(AttemptStatus::Completed),
            "flagged" => Ok(AttemptStatus::Flagged),
            other => Err(format!("Unknown attempt status '{}'", other)),
        }
    }
}

/// What the analysis field of an attempt holds: the per-answer judgment, or the
/// session report once the session has been aggregated.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisPayload {
    Judgment(JudgmentResult),
    SessionReport(SessionReport),
}

impl AnswerAttempt {
    pub fn new_submission(
        session_id: &str,
        student_name: &str,
        question_id: i32,
        answer: &str,
        answer_time: f64,
        behavior_log: BehaviorLog,
    ) -> Self {
        AnswerAttempt {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            student_name: student_name.to_string(),
            question_id,
            answer: answer.to_string(),
            answer_time,
            behavior_log,
            risk_score: None,
            analysis: None,
            status: AttemptStatus::InProgress,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn final_report(&self) -> Option<&str> {
        match &self.analysis {
            Some(AnalysisPayload::SessionReport(report)) => Some(report.final_report.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::session_report::BehaviorTotals;

    #[test]
    fn new_submission_starts_in_progress_without_score() {
        let attempt = AnswerAttempt::new_submission("s-1", "Alice", 2, "B", 12.5, BehaviorLog::default());

        assert_eq!(attempt.status, AttemptStatus::InProgress);
        assert!(attempt.risk_score.is_none());
        assert!(attempt.analysis.is_none());
        assert!(attempt.completed_at.is_none());
        assert!(Uuid::parse_str(&attempt.id).is_ok());
    }

    #[test]
    fn attempt_status_parses_and_displays_snake_case() {
        for status in [AttemptStatus::InProgress, AttemptStatus::Completed, AttemptStatus::Flagged] {
            let parsed: AttemptStatus = status.to_string().parse().expect("status should parse");
            assert_eq!(parsed, status);
        }
        assert!("pending".parse::<AttemptStatus>().is_err());
    }

    #[test]
    fn analysis_payload_is_tagged() {
        let payload = AnalysisPayload::SessionReport(SessionReport {
            final_report: "ok".to_string(),
            accuracy: 80,
            avg_risk_score: 20,
            total_behavior: BehaviorTotals::default(),
        });

        let json = serde_json::to_value(&payload).expect("payload should serialize");
        assert_eq!(json["kind"], "session_report");
        assert_eq!(json["finalReport"], "ok");
    }

    #[test]
    fn final_report_only_for_session_report_payload() {
        let mut attempt = AnswerAttempt::new_submission("s-1", "Alice", 1, "text", 30.0, BehaviorLog::default());
        attempt.analysis = Some(AnalysisPayload::Judgment(JudgmentResult::fallback()));
        assert!(attempt.final_report().is_none());

        attempt.analysis = Some(AnalysisPayload::SessionReport(SessionReport {
            final_report: "summary".to_string(),
            accuracy: 50,
            avg_risk_score: 10,
            total_behavior: BehaviorTotals::default(),
        }));
        assert_eq!(attempt.final_report(), Some("summary"));
    }

    #[test]
    fn timestamps_serialize_as_epoch_millis() {
        let attempt = AnswerAttempt::new_submission("s-1", "Alice", 1, "A", 5.0, BehaviorLog::default());
        let json = serde_json::to_value(&attempt).expect("attempt should serialize");

        assert_eq!(json["created_at"].as_i64(), Some(attempt.created_at.timestamp_millis()));
        assert!(json["completed_at"].is_null());
    }
}

use serde::{Deserialize, Serialize};

/// Behavioral counters summed across every attempt of a session.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorTotals {
    pub total_blur_count: u32,
    pub total_copy_count: u32,
    pub total_paste_count: u32,
    pub total_mouse_inactive_time: u64,
    pub average_typing_speed: f64,
    pub total_answer_time: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub final_report: String,
    pub accuracy: u8,
    pub avg_risk_score: u8,
    pub total_behavior: BehaviorTotals,
}

/// Three-tier label for a session's average risk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        if score >= 65 {
            RiskLevel::High
        } else if score > 40 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            RiskLevel::High => "High risk: detailed review recommended",
            RiskLevel::Medium => "Medium risk: attention needed",
            RiskLevel::Low => "Low risk: within normal range",
        }
    }
}

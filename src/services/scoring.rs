use crate::models::domain::{AttemptStatus, BehaviorLog, JudgmentResult};

/// Final scores at or above this value flag the attempt for review.
pub const FLAG_THRESHOLD: u8 = 65;

pub const JUDGMENT_WEIGHT: f64 = 0.5;
pub const BEHAVIOR_WEIGHT: f64 = 0.3;
pub const TRANSLATION_WEIGHT: f64 = 0.2;

/// Which band table the behavioral scorer applies.
///
/// Behavior-only scoring carries the whole decision, so it weighs heavy focus
/// loss and pasting more than the fused variant does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringPolicy {
    Fused,
    BehaviorOnly,
}

/// Additive heuristic risk score in `[0, 100]` for one attempt's telemetry.
pub fn behavioral_score(log: &BehaviorLog, answer_time_secs: f64, policy: ScoringPolicy) -> u8 {
    let mut score: u32 = 0;

    score += match log.blur_count {
        n if n > 10 && policy == ScoringPolicy::BehaviorOnly => 40,
        n if n > 5 => 30,
        n if n > 3 => 20,
        n if n > 0 => 10,
        _ => 0,
    };

    score += match log.copy_count {
        n if n > 2 => 25,
        n if n > 0 => 15,
        _ => 0,
    };

    if log.paste_count > 0 {
        score += match policy {
            ScoringPolicy::Fused => 30,
            ScoringPolicy::BehaviorOnly => 35,
        };
    }

    let inactive_secs = log.mouse_inactive_secs();
    score += if inactive_secs > 120.0 {
        25
    } else if inactive_secs > 60.0 {
        15
    } else {
        0
    };

    if log.typing_speed > 6.0 {
        score += 20;
    } else if log.typing_speed < 1.0 && log.key_press_count > 50 {
        score += 15;
    }

    if has_copy_after_long_absence(log, answer_time_secs) {
        score += 35;
    }

    score.min(100) as u8
}

/// Copying, leaving the page for more than three seconds and answering within a
/// minute, all on the same question.
fn has_copy_after_long_absence(log: &BehaviorLog, answer_time_secs: f64) -> bool {
    log.copy_count > 0
        && log.blur_count > 0
        && answer_time_secs < 60.0
        && log.blur_durations.iter().any(|&d| d > 3_000)
}

/// Weighted combination of the judgment and the fused behavioral score.
pub fn fuse_scores(judgment: &JudgmentResult, behavioral: u8) -> u8 {
    let fused = judgment.risk_score * JUDGMENT_WEIGHT
        + f64::from(behavioral) * BEHAVIOR_WEIGHT
        + judgment.translation_likelihood * TRANSLATION_WEIGHT;

    fused.clamp(0.0, 100.0).round() as u8
}

pub fn status_for(score: u8) -> AttemptStatus {
    if score >= FLAG_THRESHOLD {
        AttemptStatus::Flagged
    } else {
        AttemptStatus::Completed
    }
}

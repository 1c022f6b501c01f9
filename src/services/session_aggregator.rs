use std::{collections::HashMap, sync::Arc};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        AnalysisPayload, AnswerAttempt, BehaviorTotals, Question, RiskLevel, SessionReport,
    },
    repositories::{AttemptRepository, QuestionRepository},
    services::judgment_service::JudgmentService,
};

const PARTIAL_CREDIT: f64 = 0.5;
const MIN_KEYWORD_CHARS: usize = 3;

/// Credit earned by one answer: 1 for a matching choice, 0.5 for a free-text
/// answer that covers at least half of the model answer's keywords, else 0.
pub fn answer_credit(question: &Question, answer: &str) -> f64 {
    let Some(canonical) = question.correct_answer.as_deref() else {
        return 0.0;
    };

    if question.question_type.is_choice() {
        if answer.trim().to_uppercase() == canonical.trim().to_uppercase() {
            1.0
        } else {
            0.0
        }
    } else {
        let answer = answer.to_lowercase();
        let canonical = canonical.to_lowercase();
        let keywords: Vec<&str> = canonical
            .split_whitespace()
            .filter(|word| word.chars().count() > MIN_KEYWORD_CHARS)
            .collect();
        let matched = keywords.iter().filter(|kw| answer.contains(*kw)).count();

        // A model answer without keywords always earns partial credit.
        if matched as f64 >= keywords.len() as f64 * 0.5 {
            PARTIAL_CREDIT
        } else {
            0.0
        }
    }
}

/// Percentage of credit over `attempts`, rounded. Attempts whose question is
/// unknown earn nothing.
pub fn accuracy<'a, I>(attempts: I, questions: &HashMap<i32, Question>) -> u8
where
    I: IntoIterator<Item = &'a AnswerAttempt>,
{
    let (count, credit) = attempts
        .into_iter()
        .fold((0usize, 0.0f64), |(count, credit), attempt| {
            let earned = questions
                .get(&attempt.question_id)
                .map(|q| answer_credit(q, &attempt.answer))
                .unwrap_or(0.0);
            (count + 1, credit + earned)
        });

    if count == 0 {
        return 0;
    }
    (credit / count as f64 * 100.0).round() as u8
}

/// Mean risk score, counting unscored attempts as 0.
pub fn average_risk(attempts: &[AnswerAttempt]) -> u8 {
    if attempts.is_empty() {
        return 0;
    }
    let total: u32 = attempts
        .iter()
        .map(|a| u32::from(a.risk_score.unwrap_or(0)))
        .sum();
    (f64::from(total) / attempts.len() as f64).round() as u8
}

pub fn behavior_totals(attempts: &[AnswerAttempt]) -> BehaviorTotals {
    let mut totals = attempts
        .iter()
        .fold(BehaviorTotals::default(), |mut totals, attempt| {
            let log = &attempt.behavior_log;
            // Counters come from client snapshots and may be arbitrarily large.
            totals.total_blur_count = totals.total_blur_count.saturating_add(log.blur_count);
            totals.total_copy_count = totals.total_copy_count.saturating_add(log.copy_count);
            totals.total_paste_count = totals.total_paste_count.saturating_add(log.paste_count);
            totals.total_mouse_inactive_time = totals
                .total_mouse_inactive_time
                .saturating_add(log.mouse_inactive_time);
            totals.average_typing_speed += log.typing_speed;
            totals.total_answer_time += attempt.answer_time;
            totals
        });

    if !attempts.is_empty() {
        totals.average_typing_speed /= attempts.len() as f64;
    }
    totals
}

pub fn behavior_only_report(accuracy: u8, avg_risk: u8, totals: &BehaviorTotals) -> String {
    format!(
        "[Behavior-only analysis] Accuracy {}%, average risk {}%. Detected {} focus losses and {} copy events. {}",
        accuracy,
        avg_risk,
        totals.total_blur_count,
        totals.total_copy_count,
        RiskLevel::from_score(avg_risk).describe()
    )
}

/// Produces the end-of-session report and stores it on every attempt of the
/// session.
pub struct SessionAggregator {
    attempts: Arc<dyn AttemptRepository>,
    questions: Arc<dyn QuestionRepository>,
    judgment: Arc<JudgmentService>,
}

impl SessionAggregator {
    pub fn new(
        attempts: Arc<dyn AttemptRepository>,
        questions: Arc<dyn QuestionRepository>,
        judgment: Arc<JudgmentService>,
    ) -> Self {
        Self {
            attempts,
            questions,
            judgment,
        }
    }

    pub async fn analyze_session(
        &self,
        session_id: &str,
        use_judgment: bool,
    ) -> AppResult<SessionReport> {
        if session_id.trim().is_empty() {
            return Err(AppError::BadRequest("Missing sessionId".to_string()));
        }

        let attempts = self.attempts.find_by_session(session_id).await?;
        if attempts.is_empty() {
            return Err(AppError::NotFound(format!(
                "No attempts found for session '{}'",
                session_id
            )));
        }

        let questions: HashMap<i32, Question> = self
            .questions
            .find_all()
            .await?
            .into_iter()
            .map(|q| (q.id, q))
            .collect();

        let accuracy = accuracy(&attempts, &questions);
        let avg_risk_score = average_risk(&attempts);
        let total_behavior = behavior_totals(&attempts);

        let final_report = if use_judgment {
            log::info!("Session {}: generating report with judgment", session_id);
            self.judgment
                .session_report(&total_behavior, accuracy, &attempts)
                .await
        } else {
            log::info!("Session {}: generating behavior-only report", session_id);
            behavior_only_report(accuracy, avg_risk_score, &total_behavior)
        };

        let report = SessionReport {
            final_report,
            accuracy,
            avg_risk_score,
            total_behavior,
        };

        let updated = self
            .attempts
            .update_session_analysis(session_id, AnalysisPayload::SessionReport(report.clone()))
            .await?;

        log::info!(
            "Final analysis completed for session {}: {}% accuracy, {}% risk ({} attempts updated)",
            session_id,
            report.accuracy,
            report.avg_risk_score,
            updated
        );

        Ok(report)
    }
}

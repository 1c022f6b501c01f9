use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{AnalysisPayload, AnswerAttempt, JudgmentResult},
    repositories::{AttemptRepository, QuestionRepository},
    services::{
        judgment_service::{AnswerContext, JudgmentService},
        scoring::{behavioral_score, fuse_scores, status_for, ScoringPolicy},
    },
};

/// Final risk score for an attempt. With a judgment the behavioral score is
/// fused with it; without one the behavior-only bands decide alone.
pub fn final_score(attempt: &AnswerAttempt, judgment: Option<&JudgmentResult>) -> u8 {
    match judgment {
        Some(judgment) => {
            let behavioral =
                behavioral_score(&attempt.behavior_log, attempt.answer_time, ScoringPolicy::Fused);
            fuse_scores(judgment, behavioral)
        }
        None => behavioral_score(
            &attempt.behavior_log,
            attempt.answer_time,
            ScoringPolicy::BehaviorOnly,
        ),
    }
}

/// Scores a single stored attempt and records the outcome.
pub struct RiskAnalyzer {
    attempts: Arc<dyn AttemptRepository>,
    questions: Arc<dyn QuestionRepository>,
    judgment: Arc<JudgmentService>,
}

impl RiskAnalyzer {
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

    pub async fn analyze_attempt(&self, attempt_id: &str, use_judgment: bool) -> AppResult<u8> {
        let attempt = self
            .attempts
            .find_by_id(attempt_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Attempt with id '{}' not found", attempt_id)))?;

        let judgment = if use_judgment {
            let question = self
                .questions
                .find_by_id(attempt.question_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!(
                        "Question with id '{}' not found",
                        attempt.question_id
                    ))
                })?;

            log::info!("Judgment analysis for attempt {}", attempt_id);
            let judgment = self
                .judgment
                .analyze_answer(AnswerContext {
                    question_text: &question.question_text,
                    difficulty: question.difficulty,
                    answer: &attempt.answer,
                    behavior: &attempt.behavior_log,
                    answer_time: attempt.answer_time,
                })
                .await;
            Some(judgment)
        } else {
            log::info!("Behavior-only analysis for attempt {}", attempt_id);
            None
        };

        let score = final_score(&attempt, judgment.as_ref());
        let status = status_for(score);

        self.attempts
            .record_score(
                attempt_id,
                score,
                judgment.map(AnalysisPayload::Judgment),
                status,
            )
            .await?;

        log::info!(
            "Analysis completed [{}] for attempt {}: {}% ({})",
            if use_judgment { "judgment" } else { "behavior-only" },
            attempt_id,
            score,
            status
        );

        Ok(score)
    }
}

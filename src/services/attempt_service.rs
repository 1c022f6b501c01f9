use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{AnswerAttempt, AttemptStatus, BehaviorLog, Question},
        dto::{
            request::{StatusQuery, SubmitAnswerRequest},
            response::{SessionStatus, SubmitAnswerResponse},
        },
    },
    repositories::{AttemptRepository, QuestionRepository},
    services::{
        scoring_queue::{ScoringJob, ScoringQueue},
        session_aggregator::{accuracy, average_risk},
    },
};

const WARN_BLUR_COUNT: u32 = 3;
const WARN_INACTIVE_MS: u64 = 60_000;

/// Reviewer-facing warnings for one behavior snapshot.
pub fn behavior_warnings(log: &BehaviorLog) -> Vec<String> {
    let mut warnings = Vec::new();

    if log.blur_count > WARN_BLUR_COUNT {
        warnings.push(format!("Left the test window {} times", log.blur_count));
    }
    if log.copy_count > 0 {
        warnings.push(format!("Copied the question text {} times", log.copy_count));
    }
    if log.paste_count > 0 {
        warnings.push(format!("Pasted {} times", log.paste_count));
    }
    if log.mouse_inactive_time > WARN_INACTIVE_MS {
        warnings.push(format!(
            "Mouse was inactive for {} seconds",
            log.mouse_inactive_time / 1000
        ));
    }

    warnings
}

pub struct AttemptService {
    attempts: Arc<dyn AttemptRepository>,
    questions: Arc<dyn QuestionRepository>,
    queue: ScoringQueue,
    status_window_minutes: i64,
}

impl AttemptService {
    pub fn new(
        attempts: Arc<dyn AttemptRepository>,
        questions: Arc<dyn QuestionRepository>,
        queue: ScoringQueue,
        status_window_minutes: i64,
    ) -> Self {
        Self {
            attempts,
            questions,
            queue,
            status_window_minutes,
        }
    }

    /// Stores the attempt and queues it for scoring without waiting for the
    /// score.
    pub async fn submit_answer(
        &self,
        request: SubmitAnswerRequest,
    ) -> AppResult<SubmitAnswerResponse> {
        request.validate()?;

        if self.questions.find_by_id(request.question_id).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "Unknown question id {}",
                request.question_id
            )));
        }

        let attempt = AnswerAttempt::new_submission(
            &request.session_id,
            &request.student_name,
            request.question_id,
            &request.answer,
            request.answer_time,
            request.behavior_logs,
        );
        let attempt = self.attempts.create(attempt).await?;

        self.queue.enqueue(ScoringJob {
            attempt_id: attempt.id.clone(),
            use_judgment: request.use_judgment,
        });

        log::info!(
            "Answer submitted for session {} question {} (attempt {})",
            attempt.session_id,
            attempt.question_id,
            attempt.id
        );

        Ok(SubmitAnswerResponse {
            attempt_id: attempt.id,
            message: "Answer submitted successfully".to_string(),
        })
    }

    pub async fn get_attempt(&self, id: &str) -> AppResult<AnswerAttempt> {
        self.attempts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Attempt with id '{}' not found", id)))
    }

    /// One summary row per session with activity since the cutoff, most
    /// recently active first.
    pub async fn session_statuses(
        &self,
        query: StatusQuery,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<SessionStatus>> {
        let status = query
            .status
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::parse::<AttemptStatus>)
            .transpose()
            .map_err(AppError::BadRequest)?;

        let since = match query.since {
            Some(ms) => DateTime::<Utc>::from_timestamp_millis(ms)
                .ok_or_else(|| AppError::BadRequest(format!("Invalid since timestamp {}", ms)))?,
            None => now - Duration::minutes(self.status_window_minutes),
        };

        let attempts = self.attempts.find_since(since, status).await?;
        let questions: HashMap<i32, Question> = self
            .questions
            .find_all()
            .await?
            .into_iter()
            .map(|q| (q.id, q))
            .collect();

        let statuses = group_by_session(attempts)
            .into_iter()
            .map(|session| summarize_session(&session, &questions, now))
            .collect();

        Ok(statuses)
    }
}

/// Groups newest-first attempts by session, keeping the order in which each
/// session first appears.
fn group_by_session(attempts: Vec<AnswerAttempt>) -> Vec<Vec<AnswerAttempt>> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut sessions: Vec<Vec<AnswerAttempt>> = Vec::new();

    for attempt in attempts {
        match index.get(&attempt.session_id) {
            Some(&i) => sessions[i].push(attempt),
            None => {
                index.insert(attempt.session_id.clone(), sessions.len());
                sessions.push(vec![attempt]);
            }
        }
    }

    sessions
}

fn summarize_session(
    session: &[AnswerAttempt],
    questions: &HashMap<i32, Question>,
    now: DateTime<Utc>,
) -> SessionStatus {
    // Groups are never empty and are ordered newest first.
    let latest = &session[0];

    let mut latest_per_question: HashMap<i32, &AnswerAttempt> = HashMap::new();
    for attempt in session {
        latest_per_question
            .entry(attempt.question_id)
            .or_insert(attempt);
    }

    SessionStatus {
        session_id: latest.session_id.clone(),
        student_name: latest.student_name.clone(),
        current_question: latest_per_question.len(),
        total_questions: questions.len(),
        risk_score: latest.risk_score.unwrap_or(0),
        average_risk_score: average_risk(session),
        status: latest.status,
        warnings: behavior_warnings(&latest.behavior_log),
        accuracy: accuracy(latest_per_question.values().copied(), questions),
        final_report: latest.final_report().map(str::to_string),
        elapsed_time: (now - latest.created_at).num_seconds(),
        last_activity: latest.created_at.timestamp_millis(),
    }
}

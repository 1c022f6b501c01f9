use crate::models::domain::{AnswerAttempt, BehaviorLog, Difficulty, Question, QuestionType};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// A single-choice grammar question whose answer is "B".
    pub fn choice_question(id: i32) -> Question {
        Question {
            id,
            title: format!("Grammar {}", id),
            question_text: "Choose the correct verb form.".to_string(),
            question_type: QuestionType::Grammar,
            difficulty: Difficulty::Medium,
            correct_answer: Some("B".to_string()),
            options: Some(vec![
                "A) will finish".to_string(),
                "B) will have finished".to_string(),
            ]),
            max_score: 10,
        }
    }

    /// Four focus losses and one copy, typed at a normal pace.
    pub fn moderate_log() -> BehaviorLog {
        BehaviorLog {
            blur_count: 4,
            blur_durations: vec![800, 1_200, 900, 1_500],
            copy_count: 1,
            copied_texts: vec!["By the time you arrive".to_string()],
            typing_speed: 3.0,
            key_press_count: 40,
            ..BehaviorLog::new(0)
        }
    }

    pub fn attempt(session_id: &str, question_id: i32, answer: &str, log: BehaviorLog) -> AnswerAttempt {
        AnswerAttempt::new_submission(session_id, "Test Student", question_id, answer, 120.0, log)
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_choice_question() {
        let question = choice_question(3);
        assert_eq!(question.id, 3);
        assert!(question.question_type.is_choice());
        assert_eq!(question.correct_answer.as_deref(), Some("B"));
    }

    #[test]
    fn test_fixtures_attempt() {
        let attempt = attempt("session-1", 3, "B", moderate_log());
        assert_eq!(attempt.session_id, "session-1");
        assert_eq!(attempt.behavior_log.blur_count, 4);
        assert_eq!(attempt.answer_time, 120.0);
    }
}

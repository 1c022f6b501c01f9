mod common;

use chrono::{Duration, Utc};

use common::{InMemoryAttemptRepository, InMemoryQuestionRepository};
use proctor_server::{
    db::seed::seed_questions,
    errors::AppError,
    models::domain::{
        AnalysisPayload, AnswerAttempt, AttemptStatus, BehaviorLog, BehaviorTotals,
        JudgmentResult, SessionReport,
    },
    repositories::{AttemptRepository, QuestionRepository},
};

fn make_attempt(session_id: &str, question_id: i32, minutes_ago: i64) -> AnswerAttempt {
    let mut attempt = AnswerAttempt::new_submission(
        session_id,
        "Student",
        question_id,
        "B",
        45.0,
        BehaviorLog::default(),
    );
    attempt.created_at = Utc::now() - Duration::minutes(minutes_ago);
    attempt
}

fn report(text: &str) -> AnalysisPayload {
    AnalysisPayload::SessionReport(SessionReport {
        final_report: text.to_string(),
        accuracy: 50,
        avg_risk_score: 20,
        total_behavior: BehaviorTotals::default(),
    })
}

#[tokio::test]
async fn attempt_repository_create_find_and_score() {
    let repo = InMemoryAttemptRepository::new();

    let attempt = make_attempt("session-a", 1, 0);
    let created = repo.create(attempt.clone()).await.expect("create attempt");
    assert_eq!(created.status, AttemptStatus::InProgress);

    let duplicate = repo.create(attempt.clone()).await;
    assert!(matches!(duplicate, Err(AppError::AlreadyExists(_))));

    repo.record_score(
        &attempt.id,
        72,
        Some(AnalysisPayload::Judgment(JudgmentResult::fallback())),
        AttemptStatus::Flagged,
    )
    .await
    .expect("record score");

    let stored = repo
        .find_by_id(&attempt.id)
        .await
        .expect("find should work")
        .expect("attempt should exist");
    assert_eq!(stored.risk_score, Some(72));
    assert_eq!(stored.status, AttemptStatus::Flagged);
    assert!(stored.completed_at.is_some());

    let missing = repo
        .record_score("missing", 10, None, AttemptStatus::Completed)
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn attempt_repository_orders_session_and_window_queries() {
    let repo = InMemoryAttemptRepository::new();

    let oldest = make_attempt("session-a", 1, 8);
    let middle = make_attempt("session-b", 1, 5);
    let newest = make_attempt("session-a", 2, 1);
    let stale = make_attempt("session-c", 1, 30);
    for attempt in [&middle, &stale, &newest, &oldest] {
        repo.create(attempt.clone()).await.expect("create attempt");
    }

    let session = repo
        .find_by_session("session-a")
        .await
        .expect("session query should work");
    let ids: Vec<&str> = session.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec![oldest.id.as_str(), newest.id.as_str()]);

    let recent = repo
        .find_since(Utc::now() - Duration::minutes(10), None)
        .await
        .expect("window query should work");
    let ids: Vec<&str> = recent.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![newest.id.as_str(), middle.id.as_str(), oldest.id.as_str()]
    );

    repo.record_score(&middle.id, 80, None, AttemptStatus::Flagged)
        .await
        .expect("record score");
    let flagged = repo
        .find_since(Utc::now() - Duration::minutes(10), Some(AttemptStatus::Flagged))
        .await
        .expect("filtered query should work");
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].id, middle.id);
}

#[tokio::test]
async fn attempt_repository_session_analysis_overwrites_every_attempt() {
    let repo = InMemoryAttemptRepository::new();
    for (session, question) in [("session-a", 1), ("session-a", 2), ("session-b", 1)] {
        repo.create(make_attempt(session, question, 0))
            .await
            .expect("create attempt");
    }

    let updated = repo
        .update_session_analysis("session-a", report("first"))
        .await
        .expect("bulk update");
    assert_eq!(updated, 2);

    repo.update_session_analysis("session-a", report("second"))
        .await
        .expect("bulk update");

    let session = repo.find_by_session("session-a").await.expect("query");
    assert!(session.iter().all(|a| a.final_report() == Some("second")));

    let other = repo.find_by_session("session-b").await.expect("query");
    assert!(other[0].analysis.is_none());
}

#[tokio::test]
async fn question_repository_seed_and_lookup() {
    let repo = InMemoryQuestionRepository::new();
    assert_eq!(repo.count().await.expect("count"), 0);

    let inserted = repo
        .insert_many(seed_questions())
        .await
        .expect("insert seed");
    assert_eq!(inserted, 5);
    assert_eq!(repo.count().await.expect("count"), 5);

    let all = repo.find_all().await.expect("find all");
    let ids: Vec<i32> = all.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    let grammar = repo
        .find_by_id(3)
        .await
        .expect("find by id")
        .expect("question 3 should exist");
    assert_eq!(grammar.correct_answer.as_deref(), Some("B"));

    assert!(repo.find_by_id(42).await.expect("find by id").is_none());

    let again = repo.insert_many(seed_questions()).await;
    assert!(matches!(again, Err(AppError::AlreadyExists(_))));
}

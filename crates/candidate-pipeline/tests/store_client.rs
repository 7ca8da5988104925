mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use candidate_pipeline::pipeline::{
    Candidate, CandidateBoard, CandidateId, CandidateStore, EvaluationStatus, JobFilter,
    NotificationLevel, RecordingNotifier, StatusFilter, StoreError,
};
use common::{six_candidates, MockBackend};
use serde_json::json;

fn store_for(base_url: &str) -> (CandidateStore, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let store = CandidateStore::new(base_url, Arc::new(notifier.clone()));
    (store, notifier)
}

#[tokio::test]
async fn list_maps_backend_records_and_feeds_the_board() {
    let base_url = MockBackend::with_records(six_candidates()).spawn().await;
    let (store, notifier) = store_for(&base_url);

    let candidates = store.list().await;
    assert_eq!(candidates.len(), 6);
    assert_eq!(candidates[0].id, CandidateId::new("1"));
    assert_eq!(candidates[0].job_applied_for, "Frontend Developer");
    assert_eq!(candidates[0].transcript, "");
    assert!(notifier.events().is_empty());

    let mut board = CandidateBoard::new(candidates);
    let stats = board.stats();
    assert_eq!(
        (stats.total, stats.pending, stats.passed, stats.failed),
        (6, 3, 2, 1)
    );

    board.set_filters(StatusFilter::All, JobFilter::from("Backend Developer"));
    let view = board.view();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].candidate.name, "Linus Torvalds");
    assert_eq!(view.stats.total, 6);
}

#[tokio::test]
async fn list_degrades_to_empty_on_backend_error() {
    let backend = MockBackend::with_records(six_candidates());
    backend.fail_list_with(StatusCode::INTERNAL_SERVER_ERROR);
    let base_url = backend.spawn().await;
    let (store, notifier) = store_for(&base_url);

    let candidates = store.list().await;

    assert!(candidates.is_empty());
    let events = notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, NotificationLevel::Error);
    assert_eq!(events[0].message, "Failed to fetch candidates.");
}

#[tokio::test]
async fn list_degrades_to_empty_when_backend_unreachable() {
    let (store, notifier) = store_for("http://127.0.0.1:1");

    assert!(store.list().await.is_empty());
    assert_eq!(notifier.count(NotificationLevel::Error), 1);
}

#[tokio::test]
async fn list_degrades_to_empty_on_undecodable_body() {
    let backend = MockBackend::with_records(six_candidates());
    backend.serve_plain_text_list();
    let base_url = backend.spawn().await;
    let (store, notifier) = store_for(&base_url);

    assert!(store.list().await.is_empty());
    let events = notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message, "Failed to fetch candidates.");
}

#[tokio::test]
async fn list_rejects_records_without_ids() {
    let base_url = MockBackend::with_records(vec![json!({ "name": "ghost" })])
        .spawn()
        .await;
    let (store, notifier) = store_for(&base_url);

    assert!(store.list().await.is_empty());
    assert_eq!(notifier.count(NotificationLevel::Error), 1);
}

#[tokio::test]
async fn get_by_id_returns_mapped_candidate() {
    let base_url = MockBackend::with_records(six_candidates()).spawn().await;
    let (store, notifier) = store_for(&base_url);

    let candidate = store
        .get_by_id(&CandidateId::new("2"))
        .await
        .expect("candidate exists");

    assert_eq!(candidate.name, "Grace Hopper");
    assert_eq!(candidate.status, EvaluationStatus::Pass);
    assert_eq!(candidate.phone, "+1 (555) 123-4567");
    assert!(notifier.events().is_empty());
}

#[tokio::test]
async fn get_by_id_missing_candidate_notifies_once() {
    let base_url = MockBackend::with_records(six_candidates()).spawn().await;
    let (store, notifier) = store_for(&base_url);

    let err = store
        .get_by_id(&CandidateId::new("999"))
        .await
        .expect_err("candidate 999 does not exist");

    assert!(matches!(err, StoreError::NotFound(ref id) if id.as_str() == "999"));
    assert!(err.is_not_found());
    let events = notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message, "Candidate not found");
}

#[tokio::test]
async fn get_by_id_encodes_reserved_characters_in_id() {
    let base_url = MockBackend::with_records(six_candidates()).spawn().await;
    let (store, notifier) = store_for(&base_url);

    for raw in ["2#frag", "2?id=2", "2/extra"] {
        let err = store
            .get_by_id(&CandidateId::new(raw))
            .await
            .expect_err("no candidate carries this id");
        assert!(matches!(err, StoreError::NotFound(ref id) if id.as_str() == raw));
    }
    assert_eq!(notifier.count(NotificationLevel::Error), 3);
}

#[tokio::test]
async fn get_by_id_transport_failure_is_not_reported_as_missing() {
    let (store, notifier) = store_for("http://127.0.0.1:1");

    let err = store
        .get_by_id(&CandidateId::new("1"))
        .await
        .expect_err("backend unreachable");

    assert!(matches!(err, StoreError::Transport(_)));
    assert_eq!(notifier.count(NotificationLevel::Error), 1);
}

#[tokio::test]
async fn update_sends_backend_payload_and_preserves_target_id() {
    let backend = MockBackend::with_records(six_candidates());
    let base_url = backend.clone().spawn().await;
    let (store, notifier) = store_for(&base_url);

    let edited = Candidate {
        id: CandidateId::new("something-else"),
        name: "Ada King".to_string(),
        summary: "Analytical engine notes".to_string(),
        job_applied_for: "Backend Developer".to_string(),
        status: EvaluationStatus::Pass,
        phone: "+44 20 7946 0018".to_string(),
        email: "ada@example.com".to_string(),
        transcript: "should not be sent".to_string(),
    };

    let updated = store
        .update(&CandidateId::new("1"), &edited)
        .await
        .expect("update succeeds");

    assert_eq!(updated.id, CandidateId::new("1"));
    assert_eq!(updated.name, "Ada King");
    assert_eq!(updated.job_applied_for, "Backend Developer");
    assert_eq!(updated.status, EvaluationStatus::Pass);

    let bodies = backend.put_bodies();
    assert_eq!(bodies.len(), 1);
    assert_eq!(
        bodies[0],
        json!({
            "name": "Ada King",
            "summary": "Analytical engine notes",
            "position": "Backend Developer",
            "phone_number": "+44 20 7946 0018",
            "status": "pass"
        })
    );

    let events = notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, NotificationLevel::Success);
    assert_eq!(events[0].message, "Ada King's information updated");
}

#[tokio::test]
async fn update_keeps_target_id_when_backend_echoes_another() {
    let backend = MockBackend::with_records(six_candidates());
    backend.echo_id(json!(77));
    let base_url = backend.spawn().await;
    let (store, _notifier) = store_for(&base_url);

    let loaded = store
        .get_by_id(&CandidateId::new("3"))
        .await
        .expect("candidate exists");
    let updated = store
        .update(&CandidateId::new("3"), &loaded)
        .await
        .expect("update succeeds");

    assert_eq!(updated.id, CandidateId::new("3"));
}

#[tokio::test]
async fn update_missing_candidate_notifies_and_returns_error() {
    let base_url = MockBackend::with_records(six_candidates()).spawn().await;
    let (store, notifier) = store_for(&base_url);

    let err = store
        .update(&CandidateId::new("404"), &Candidate::default())
        .await
        .expect_err("candidate missing");

    assert!(err.is_not_found());
    assert_eq!(notifier.events().len(), 1);
    assert_eq!(notifier.count(NotificationLevel::Error), 1);
}

#[tokio::test]
async fn update_with_reserved_characters_does_not_touch_other_records() {
    let base_url = MockBackend::with_records(six_candidates()).spawn().await;
    let (store, _notifier) = store_for(&base_url);

    let intruder = Candidate {
        name: "Overwritten".to_string(),
        ..Candidate::default()
    };
    let err = store
        .update(&CandidateId::new("2#frag"), &intruder)
        .await
        .expect_err("no candidate carries this id");
    assert!(err.is_not_found());

    let untouched = store
        .get_by_id(&CandidateId::new("2"))
        .await
        .expect("candidate 2 exists");
    assert_eq!(untouched.name, "Grace Hopper");
}

#[tokio::test]
async fn update_status_sends_only_status() {
    let backend = MockBackend::with_records(six_candidates());
    let base_url = backend.clone().spawn().await;
    let (store, notifier) = store_for(&base_url);

    let updated = store
        .update_status(&CandidateId::new("3"), &EvaluationStatus::Pass)
        .await
        .expect("status update succeeds");

    assert_eq!(updated.status, EvaluationStatus::Pass);
    assert_eq!(updated.name, "Alan Turing");
    assert_eq!(backend.put_bodies(), vec![json!({ "status": "pass" })]);
    assert_eq!(
        notifier.events()[0].message,
        "Alan Turing's status updated to pass"
    );
}

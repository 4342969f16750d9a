//! Integration tests for the job lifecycle state machine and its
//! notification side effects.

mod common;

use axum::http::StatusCode;
use common::server::{TestServer, json_request, submit_file};
use imprint_core::JobStatus;
use serde_json::json;

async fn submit(server: &TestServer, name: &str) -> String {
    let (status, body) = submit_file(&server.router, Some((name, b"data")), None, None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn set_status(
    server: &TestServer,
    id: &str,
    status: &str,
) -> (StatusCode, serde_json::Value) {
    json_request(
        &server.router,
        "POST",
        &format!("/v1/jobs/{id}/status"),
        Some(json!({"status": status})),
    )
    .await
}

#[tokio::test]
async fn test_legal_transitions_advance() {
    let server = TestServer::new().await;
    let id = submit(&server, "a.pdf").await;

    let (status, job) = set_status(&server, &id, "processing").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(job["status"], "processing");

    let (status, job) = set_status(&server, &id, "completed").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(job["status"], "completed");
}

#[tokio::test]
async fn test_skipping_a_state_is_rejected() {
    let server = TestServer::new().await;
    let id = submit(&server, "a.pdf").await;

    let (status, body) = set_status(&server, &id, "completed").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "invalid_transition");

    // The original status is retained.
    let (_, job) = json_request(&server.router, "GET", &format!("/v1/jobs/{id}"), None).await;
    assert_eq!(job["status"], "pending");
}

#[tokio::test]
async fn test_backward_transitions_are_rejected() {
    let server = TestServer::new().await;
    let id = submit(&server, "a.pdf").await;

    set_status(&server, &id, "processing").await;

    let (status, _) = set_status(&server, &id, "pending").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, job) = json_request(&server.router, "GET", &format!("/v1/jobs/{id}"), None).await;
    assert_eq!(job["status"], "processing");
}

#[tokio::test]
async fn test_completed_is_terminal() {
    let server = TestServer::new().await;
    let id = submit(&server, "a.pdf").await;

    set_status(&server, &id, "processing").await;
    set_status(&server, &id, "completed").await;

    for requested in ["pending", "processing", "completed"] {
        let (status, _) = set_status(&server, &id, requested).await;
        assert_eq!(status, StatusCode::CONFLICT, "requested = {requested}");
    }
}

#[tokio::test]
async fn test_unknown_status_value_is_bad_request() {
    let server = TestServer::new().await;
    let id = submit(&server, "a.pdf").await;

    let (status, body) = set_status(&server, &id, "printing").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn test_status_update_for_unknown_job_is_not_found() {
    let server = TestServer::new().await;

    let (status, _) = json_request(
        &server.router,
        "POST",
        "/v1/jobs/00000000-0000-4000-8000-000000000000/status",
        Some(json!({"status": "processing"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_transitions_notify_in_order_with_custom_message() {
    let server = TestServer::new().await;
    let id = submit(&server, "a.pdf").await;

    let (status, _) = json_request(
        &server.router,
        "POST",
        &format!("/v1/jobs/{id}/status"),
        Some(json!({"status": "processing", "message": "On the press now"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    set_status(&server, &id, "completed").await;

    // Submission notifies pending, then one event per transition.
    let notifications = server.wait_for_notifications(3).await;
    let statuses: Vec<JobStatus> = notifications.iter().map(|n| n.status).collect();
    assert_eq!(
        statuses,
        vec![
            JobStatus::Pending,
            JobStatus::Processing,
            JobStatus::Completed
        ]
    );
    assert_eq!(notifications[1].message, "On the press now");
    assert_eq!(notifications[0].job_id.to_string(), id);
}

#[tokio::test]
async fn test_completing_a_pending_job_fires_every_transition() {
    let server = TestServer::new().await;
    let id = submit(&server, "a.pdf").await;

    let (status, _) =
        json_request(&server.router, "DELETE", &format!("/v1/queue/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    // pending (submission), then processing and completed from the
    // stepwise advance: no state is skipped.
    let notifications = server.wait_for_notifications(3).await;
    let statuses: Vec<JobStatus> = notifications.iter().map(|n| n.status).collect();
    assert_eq!(
        statuses,
        vec![
            JobStatus::Pending,
            JobStatus::Processing,
            JobStatus::Completed
        ]
    );
}

#[tokio::test]
async fn test_rejected_transition_emits_no_notification() {
    let server = TestServer::new().await;
    let id = submit(&server, "a.pdf").await;

    // Only the submission notification exists before the rejection.
    server.wait_for_notifications(1).await;

    let (status, _) = set_status(&server, &id, "completed").await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Give the dispatcher a moment; the count must not grow.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(server.notifier.received().await.len(), 1);
}

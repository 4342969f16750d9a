//! Server test utilities.

use super::fixtures::{multipart_body, multipart_content_type};
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Request, StatusCode};
use bytes::Bytes;
use imprint_core::config::AppConfig;
use imprint_notify::{NotifierHandle, RecordingNotifier, StatusNotification};
use imprint_queue::{PrintQueue, TrackingIndex};
use imprint_server::{AppState, create_router};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// A test server wrapper with all dependencies.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    /// Captures every notification the flows emit.
    pub notifier: Arc<RecordingNotifier>,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a new test server with an in-memory store.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test server with custom config modifications.
    pub async fn with_config<F>(modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = AppConfig::for_testing();
        modifier(&mut config);

        let content =
            imprint_store::from_config(&config.store).expect("Failed to create content store");

        let notifier = Arc::new(RecordingNotifier::new());
        let (handle, _task) = NotifierHandle::spawn(notifier.clone());

        let state = AppState::new(
            config,
            content,
            Arc::new(PrintQueue::new()),
            Arc::new(TrackingIndex::new()),
            handle,
        );
        let router = create_router(state.clone());

        Self {
            router,
            state,
            notifier,
        }
    }

    /// Wait until at least `count` notifications have been delivered.
    /// Panics after a 2 second deadline.
    pub async fn wait_for_notifications(&self, count: usize) -> Vec<StatusNotification> {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        loop {
            let received = self.notifier.received().await;
            if received.len() >= count {
                return received;
            }
            if tokio::time::Instant::now() > deadline {
                panic!(
                    "expected {} notifications, got {} in time",
                    count,
                    received.len()
                );
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

/// Helper to make JSON requests.
#[allow(dead_code)]
pub async fn json_request(
    router: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    let body = match body {
        Some(v) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };

    let request = builder.body(body).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// Submit a file through the multipart endpoint.
#[allow(dead_code)]
pub async fn submit_file(
    router: &axum::Router,
    file: Option<(&str, &[u8])>,
    copies: Option<&str>,
    priority: Option<&str>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/jobs")
        .header(CONTENT_TYPE, multipart_content_type())
        .body(Body::from(multipart_body(file, copies, priority)))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
    (status, json)
}

/// GET a URI, returning status, headers, and the raw body.
#[allow(dead_code)]
pub async fn get_raw(router: &axum::Router, uri: &str) -> (StatusCode, HeaderMap, Bytes) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body)
}

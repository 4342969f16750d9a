//! Route configuration.

use crate::handlers;
use crate::metrics::metrics_handler;
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Health check (intentionally unauthenticated for probes)
        .route("/v1/health", get(handlers::health_check))
        // Submission and tracking
        .route("/v1/jobs", post(handlers::submit_job))
        .route("/v1/jobs/{job_id}", get(handlers::track_job))
        .route("/v1/jobs/{job_id}/status", post(handlers::update_job_status))
        // Operator queue
        .route("/v1/queue", get(handlers::list_queue))
        .route("/v1/queue/next", get(handlers::next_job))
        .route("/v1/queue/{job_id}", delete(handlers::complete_job))
        // Downloads
        .route("/v1/files/{file_name}", get(handlers::download_file))
        // Dashboard counters
        .route("/v1/stats", get(handlers::get_stats));

    let mut router = Router::new().merge(api_routes);

    // Conditionally add the Prometheus endpoint based on config.
    // When enabled on an exposed network, restrict it to authorized
    // scraper IPs at the infrastructure level.
    if state.config.server.metrics_enabled {
        router = router.merge(Router::new().route("/metrics", get(metrics_handler)));
    }

    let max_upload_bytes = state.config.server.max_upload_bytes;

    router
        // Uploads are the only large bodies; one limit covers the API.
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! Health and statistics endpoints.

use crate::error::ApiResult;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use imprint_queue::JobStats;
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /v1/health - Health check.
/// Intentionally unauthenticated for load balancers and probes.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    // Probe the content store.
    state.content.object_count().await?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}

/// Statistics response for the operator dashboard.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Job counts by lifecycle status.
    pub jobs: JobStats,
    /// Entries currently awaiting the operator.
    pub queue_depth: usize,
    /// Files currently held by the content store.
    pub stored_files: u64,
}

/// GET /v1/stats - Job, queue, and store counters.
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<StatsResponse>> {
    Ok(Json(StatsResponse {
        jobs: state.index.stats().await,
        queue_depth: state.queue.len().await,
        stored_files: state.content.object_count().await?,
    }))
}

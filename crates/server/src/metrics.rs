//! Prometheus metrics for the Imprint server.
//!
//! Exposes counters for job throughput and content expiry plus a queue
//! depth gauge. The `/metrics` endpoint is unauthenticated to allow
//! Prometheus scraping; restrict it at the infrastructure level when the
//! server is reachable from untrusted networks.

use axum::http::StatusCode;
use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};
use std::sync::{LazyLock, Once};

/// Global Prometheus registry for all metrics.
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

pub static JOBS_SUBMITTED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "imprint_jobs_submitted_total",
        "Total number of print jobs submitted",
    )
    .expect("metric creation failed")
});

pub static JOBS_COMPLETED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "imprint_jobs_completed_total",
        "Total number of print jobs completed",
    )
    .expect("metric creation failed")
});

pub static FILES_EXPIRED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "imprint_files_expired_total",
        "Total number of stored files evicted by the retention sweep",
    )
    .expect("metric creation failed")
});

pub static NOTIFICATIONS_EMITTED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "imprint_notifications_emitted_total",
        "Total number of status notifications queued for dispatch",
    )
    .expect("metric creation failed")
});

pub static QUEUE_DEPTH: LazyLock<IntGauge> = LazyLock::new(|| {
    IntGauge::new("imprint_queue_depth", "Current number of queued entries")
        .expect("metric creation failed")
});

static REGISTER: Once = Once::new();

/// Register all metrics with the global registry. Idempotent.
pub fn register_metrics() {
    REGISTER.call_once(|| {
        REGISTRY
            .register(Box::new(JOBS_SUBMITTED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(JOBS_COMPLETED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(FILES_EXPIRED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(NOTIFICATIONS_EMITTED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(QUEUE_DEPTH.clone()))
            .expect("metric registration failed");
    });
}

/// GET /metrics - Prometheus text exposition.
pub async fn metrics_handler() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "failed to encode metrics");
        return (StatusCode::INTERNAL_SERVER_ERROR, String::new());
    }

    match String::from_utf8(buffer) {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => {
            tracing::error!(error = %e, "metrics are not valid UTF-8");
            (StatusCode::INTERNAL_SERVER_ERROR, String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_is_idempotent_and_metrics_render() {
        register_metrics();
        register_metrics();

        JOBS_SUBMITTED.inc();
        QUEUE_DEPTH.set(3);

        let (status, body) = metrics_handler().await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("imprint_jobs_submitted_total"));
        assert!(body.contains("imprint_queue_depth"));
    }
}

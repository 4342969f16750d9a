//! Application state shared across handlers.

use imprint_core::config::AppConfig;
use imprint_notify::NotifierHandle;
use imprint_queue::{PrintQueue, TrackingIndex};
use imprint_store::ContentStore;
use std::sync::Arc;

/// Shared application state.
///
/// All stores are constructed once at startup and injected here; handlers
/// clone the state and reach the stores through it. There are no ambient
/// globals.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Content store for submitted file bytes.
    pub content: Arc<dyn ContentStore>,
    /// Ordered queue of jobs awaiting the operator.
    pub queue: Arc<PrintQueue>,
    /// Job records and lifecycle status by id.
    pub index: Arc<TrackingIndex>,
    /// Channel into the notification consumer task.
    pub notifier: NotifierHandle,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Validates the configuration and logs warnings for legal but unusual
    /// settings.
    ///
    /// # Panics
    ///
    /// Panics if store configuration validation fails with an error.
    pub fn new(
        config: AppConfig,
        content: Arc<dyn ContentStore>,
        queue: Arc<PrintQueue>,
        index: Arc<TrackingIndex>,
        notifier: NotifierHandle,
    ) -> Self {
        // Fail fast on errors, log warnings.
        match config.store.validate() {
            Ok(warnings) => {
                for warning in warnings {
                    tracing::warn!("Configuration warning: {}", warning);
                }
            }
            Err(error) => {
                panic!("Invalid store configuration: {}", error);
            }
        }

        Self {
            config: Arc::new(config),
            content,
            queue,
            index,
            notifier,
        }
    }
}

//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use time::Duration;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum accepted upload body size in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Enable the /metrics endpoint for Prometheus scraping (default: true).
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024 // 25 MiB
}

fn default_metrics_enabled() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_upload_bytes: default_max_upload_bytes(),
            metrics_enabled: default_metrics_enabled(),
        }
    }
}

/// Content store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Process-lifetime in-memory store.
    Memory {
        /// Retention window in seconds before stored content is evicted.
        #[serde(default = "default_retention_secs")]
        retention_secs: u64,
    },
}

fn default_retention_secs() -> u64 {
    crate::DEFAULT_RETENTION_SECS
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::Memory {
            retention_secs: default_retention_secs(),
        }
    }
}

impl StoreConfig {
    /// Get the retention window as a Duration.
    pub fn retention(&self) -> Duration {
        match self {
            Self::Memory { retention_secs } => {
                // Saturate at i64::MAX to prevent overflow wrapping to negative
                let secs = i64::try_from(*retention_secs).unwrap_or(i64::MAX);
                Duration::seconds(secs)
            }
        }
    }

    /// Validate the configuration. Returns warnings for legal but unusual
    /// settings, or an error message for settings that cannot work.
    pub fn validate(&self) -> Result<Vec<String>, String> {
        match self {
            Self::Memory { retention_secs } => {
                if *retention_secs == 0 {
                    return Err(
                        "store.retention_secs must be greater than zero (content would expire on the next submission)"
                            .to_string(),
                    );
                }

                let mut warnings = Vec::new();
                if *retention_secs < 60 {
                    warnings.push(format!(
                        "store.retention_secs is very short ({retention_secs}s); customers may lose downloads before the operator prints them"
                    ));
                }
                Ok(warnings)
            }
        }
    }
}

/// Notification dispatch configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NotifyConfig {
    /// Log-only dispatch: notifications are written to the tracing output.
    /// Real delivery (email etc.) is an external collaborator.
    #[default]
    Log,
}

/// Application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
}

impl AppConfig {
    /// Create a test configuration.
    ///
    /// **For testing only.** Binds to an ephemeral port.
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig {
                bind: "127.0.0.1:0".to_string(),
                ..Default::default()
            },
            store: StoreConfig::default(),
            notify: NotifyConfig::Log,
        }
    }
}

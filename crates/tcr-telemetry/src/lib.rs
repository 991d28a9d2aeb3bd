//! # Registry Telemetry
//!
//! Structured logging and metrics exposition for hosts of the token registry.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tcr_telemetry::{init_tracing, TelemetryConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let _guard = init_tracing(&TelemetryConfig::from_env())?;
//!     // registry operations now log through the global subscriber
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TCR_SERVICE_NAME` | `token-registry` | Service name in log lines |
//! | `TCR_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `TCR_JSON_LOGS` | `false` (`true` in containers) | JSON output |
//! | `TCR_LOG_SOURCE` | `false` | File and line per event |

mod config;
mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::encode_metrics;
pub use tracing_setup::{env_filter, init_test_tracing, init_tracing, TracingGuard};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Failed to encode metrics: {0}")]
    MetricsEncode(String),
}

//! Telemetry configuration from environment variables.

use std::env;

/// Logging setup for a registry host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Filter directive (trace, debug, info, warn, error, or `target=level` lists)
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output
    pub json_logs: bool,

    /// Include file and line in each event
    pub with_source_location: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "token-registry".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            with_source_location: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `TCR_SERVICE_NAME`: Service name (default: token-registry)
    /// - `TCR_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `TCR_JSON_LOGS`: JSON output (default: true inside containers)
    /// - `TCR_LOG_SOURCE`: Include file and line (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();
        let defaults = Self::default();

        Self {
            service_name: lookup("TCR_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: lookup("TCR_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: lookup("TCR_JSON_LOGS")
                .map(|v| is_truthy(&v))
                .unwrap_or(is_container),

            with_source_location: lookup("TCR_LOG_SOURCE")
                .map(|v| is_truthy(&v))
                .unwrap_or(defaults.with_source_location),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

//! Prometheus text exposition.
//!
//! Registry metrics register with the default `prometheus` registry when the
//! `metrics` feature of `tcr-05-token-registry` is on; this gathers them.

use prometheus::{Encoder, TextEncoder};

use crate::TelemetryError;

/// Render every registered metric in the Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|e| TelemetryError::MetricsEncode(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsEncode(e.to_string()))
}

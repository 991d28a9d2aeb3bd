//! # Error Types
//!
//! Parse errors for the textual forms of shared value objects.

use thiserror::Error;

/// Errors produced when parsing an address or hash from hex text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input is not valid hexadecimal.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// The decoded input has the wrong number of bytes.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

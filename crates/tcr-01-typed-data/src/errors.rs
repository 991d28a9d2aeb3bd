//! # Typed Data Errors

use thiserror::Error;

/// Errors raised while preparing typed-data fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypedDataError {
    /// An attribute name does not fit in a `bytes32`.
    #[error("Attribute name too long: {len} bytes, maximum is 32")]
    NameTooLong { len: usize },
}

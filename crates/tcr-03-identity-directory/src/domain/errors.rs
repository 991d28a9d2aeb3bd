//! # Directory Errors

use shared_types::Address;
use tcr_02_signature_verification::AuthorizationError;
use thiserror::Error;

/// Errors raised by the identity directory.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// A direct write was attempted by someone other than the owner.
    #[error("Caller {caller:?} is not the owner {owner:?} of {identity:?}")]
    Unauthorized {
        identity: Address,
        owner: Address,
        caller: Address,
    },

    /// A signed write failed verification.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
}

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

//! # Token Errors

use shared_types::{Address, Timestamp, U256};
use tcr_02_signature_verification::AuthorizationError;
use thiserror::Error;

/// Errors raised by token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The source account cannot cover the amount.
    #[error("Insufficient balance: {holder:?} has {balance}, needs {needed}")]
    InsufficientBalance {
        holder: Address,
        balance: U256,
        needed: U256,
    },

    /// The spender's allowance cannot cover the amount.
    #[error("Insufficient allowance: {spender:?} may move {allowance} of {owner:?}, needs {needed}")]
    InsufficientAllowance {
        owner: Address,
        spender: Address,
        allowance: U256,
        needed: U256,
    },

    /// A permit named the zero address as holder.
    #[error("Permit holder is the zero address")]
    ZeroHolder,

    /// A permit was presented after its expiry.
    #[error("Permit expired at {expiry}, now {now}")]
    PermitExpired { expiry: U256, now: Timestamp },

    /// Minting would overflow the total supply.
    #[error("Supply overflow")]
    SupplyOverflow,

    /// The permit signature or nonce was rejected.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
}

/// Result type for token operations.
pub type TokenResult<T> = Result<T, TokenError>;

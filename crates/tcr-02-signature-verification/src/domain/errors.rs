//! # Signature Errors

use shared_types::{Address, U256};
use thiserror::Error;

/// Errors that can occur while recovering or checking a signer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// R or S is outside [1, n-1], or R is not an x-coordinate on the curve.
    #[error("Invalid signature format")]
    InvalidFormat,

    /// Signature has high S value (EIP-2 malleability protection).
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28).
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover a public key from the signature.
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Recovered signer does not match the party entitled to sign.
    #[error("Signer mismatch: expected {expected:?}, got {actual:?}")]
    SignerMismatch { expected: Address, actual: Address },

    /// A private key is not a valid non-zero scalar.
    #[error("Invalid signing key")]
    InvalidSigningKey,

    /// The signing primitive failed.
    #[error("Signing failed")]
    SigningFailed,
}

/// Why an off-line authorization was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    /// The signature did not recover to the expected signer.
    #[error("Invalid signature: {0}")]
    InvalidSignature(#[from] SignatureError),

    /// The authorization was signed for a nonce other than the current one.
    #[error("Nonce mismatch for {identity:?}: expected {expected}, presented {presented}")]
    NonceMismatch {
        identity: Address,
        expected: U256,
        presented: U256,
    },
}

impl AuthorizationError {
    /// True for stale or replayed authorizations.
    #[must_use]
    pub fn is_nonce_mismatch(&self) -> bool {
        matches!(self, Self::NonceMismatch { .. })
    }
}

//! # Outbound Ports (Driven Ports / SPI)

use crate::domain::errors::SignatureError;
use shared_types::{Address, EcdsaSignature, Hash};

/// Recovers the address that produced a signature over a prehashed digest.
///
/// Isolates the curve from nonce and authorization logic so the verifier can
/// run against deterministic fixtures.
pub trait SignerRecovery: Send + Sync {
    /// Recover the signer of `digest`.
    ///
    /// # Errors
    /// Any malformed, malleable or unrecoverable signature.
    fn recover(&self, digest: &Hash, signature: &EcdsaSignature) -> Result<Address, SignatureError>;
}

//! # Domain Entities

use serde::{Deserialize, Serialize};
use shared_types::{EcdsaSignature, U256};

/// An off-line authorization as presented by a relayer: the nonce it was
/// signed for and the signature itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedAuthorization {
    /// Nonce embedded in the signed digest.
    pub nonce: U256,
    /// Signature over the digest.
    pub signature: EcdsaSignature,
}

impl SignedAuthorization {
    /// Pair a nonce with its signature.
    #[must_use]
    pub const fn new(nonce: U256, signature: EcdsaSignature) -> Self {
        Self { nonce, signature }
    }
}

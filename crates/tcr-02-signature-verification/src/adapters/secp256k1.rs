//! k256-backed signer recovery.

use crate::domain::ecdsa::recover_signer;
use crate::domain::errors::SignatureError;
use crate::ports::outbound::SignerRecovery;
use shared_types::{Address, EcdsaSignature, Hash};

/// Production `SignerRecovery` over secp256k1.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Recovery;

impl SignerRecovery for Secp256k1Recovery {
    fn recover(&self, digest: &Hash, signature: &EcdsaSignature) -> Result<Address, SignatureError> {
        recover_signer(digest, signature)
    }
}

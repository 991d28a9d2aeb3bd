//! # Signature Verifier
//!
//! Settles off-line authorizations: nonce check, signer recovery through the
//! `SignerRecovery` port, then nonce consumption. Each contract-like
//! collaborator owns one verifier, so nonce spaces never mix.

use crate::adapters::Secp256k1Recovery;
use crate::domain::entities::SignedAuthorization;
use crate::domain::errors::{AuthorizationError, SignatureError};
use crate::domain::nonces::NonceLedger;
use crate::ports::outbound::SignerRecovery;
use shared_types::{Address, EcdsaSignature, Hash, U256};
use tracing::debug;

/// Verifies authorizations and tracks per-identity nonces.
#[derive(Debug, Clone)]
pub struct SignatureVerifier<R: SignerRecovery = Secp256k1Recovery> {
    recovery: R,
    nonces: NonceLedger,
}

impl SignatureVerifier<Secp256k1Recovery> {
    /// Verifier backed by k256 recovery.
    #[must_use]
    pub fn secp256k1() -> Self {
        Self::new(Secp256k1Recovery)
    }
}

impl Default for SignatureVerifier<Secp256k1Recovery> {
    fn default() -> Self {
        Self::secp256k1()
    }
}

impl<R: SignerRecovery> SignatureVerifier<R> {
    /// Create a verifier with an empty nonce ledger.
    pub fn new(recovery: R) -> Self {
        Self {
            recovery,
            nonces: NonceLedger::new(),
        }
    }

    /// The nonce the next authorization for `identity` must carry.
    #[must_use]
    pub fn current_nonce(&self, identity: &Address) -> U256 {
        self.nonces.current(identity)
    }

    /// Read-only view of the ledger.
    #[must_use]
    pub fn nonces(&self) -> &NonceLedger {
        &self.nonces
    }

    /// Check an authorization and consume `identity`'s nonce.
    ///
    /// The nonce is compared first, so stale and replayed authorizations are
    /// reported as `NonceMismatch` rather than as a bad signature. Nothing
    /// changes unless the whole check passes.
    ///
    /// # Errors
    /// - `NonceMismatch` if `presented_nonce` is not the current nonce
    /// - `InvalidSignature` if recovery fails or yields another signer
    pub fn verify(
        &mut self,
        digest: &Hash,
        signature: &EcdsaSignature,
        expected_signer: &Address,
        identity: &Address,
        presented_nonce: U256,
    ) -> Result<(), AuthorizationError> {
        let expected = self.nonces.current(identity);
        if presented_nonce != expected {
            return Err(AuthorizationError::NonceMismatch {
                identity: *identity,
                expected,
                presented: presented_nonce,
            });
        }

        let recovered = self.recovery.recover(digest, signature)?;
        if recovered != *expected_signer {
            return Err(SignatureError::SignerMismatch {
                expected: *expected_signer,
                actual: recovered,
            }
            .into());
        }

        let consumed = self.nonces.advance(identity);
        debug!(identity = %identity, nonce = %consumed, "Authorization consumed");
        Ok(())
    }

    /// `verify` for an authorization carried as a `SignedAuthorization`.
    pub fn verify_authorization(
        &mut self,
        digest: &Hash,
        authorization: &SignedAuthorization,
        expected_signer: &Address,
        identity: &Address,
    ) -> Result<(), AuthorizationError> {
        self.verify(
            digest,
            &authorization.signature,
            expected_signer,
            identity,
            authorization.nonce,
        )
    }
}

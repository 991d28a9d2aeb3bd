//! # Off-line Signer
//!
//! The signing side of an authorization: identities, fee payers and sponsors
//! use it to produce signatures over digests from `tcr-01-typed-data`.

use super::ecdsa::{address_from_pubkey, invert_s, is_low_s};
use super::errors::SignatureError;
use k256::ecdsa::SigningKey;
use shared_types::{Address, EcdsaSignature, Hash};
use std::fmt;

/// A secp256k1 private key with its derived address.
#[derive(Clone)]
pub struct Secp256k1Signer {
    key: SigningKey,
    address: Address,
}

impl Secp256k1Signer {
    /// Load a signer from a 32-byte private key.
    pub fn from_bytes(secret: &[u8; 32]) -> Result<Self, SignatureError> {
        let key = SigningKey::from_slice(secret).map_err(|_| SignatureError::InvalidSigningKey)?;
        let address = address_from_pubkey(key.verifying_key());
        Ok(Self { key, address })
    }

    /// Address controlled by this key.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a prehashed digest (RFC 6979).
    ///
    /// S is normalized to the lower half of the order and `v` is 27 or 28.
    pub fn sign_digest(&self, digest: &Hash) -> Result<EcdsaSignature, SignatureError> {
        let (sig, recid) = self
            .key
            .sign_prehash_recoverable(digest)
            .map_err(|_| SignatureError::SigningFailed)?;

        let sig_bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&sig_bytes[..32]);
        s.copy_from_slice(&sig_bytes[32..]);

        let mut parity = recid.to_byte() & 1;
        if !is_low_s(&s) {
            s = invert_s(&s);
            parity ^= 1;
        }

        Ok(EcdsaSignature {
            r,
            s,
            v: 27 + parity,
        })
    }
}

impl fmt::Debug for Secp256k1Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secp256k1Signer")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

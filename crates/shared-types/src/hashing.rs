//! # Keccak-256
//!
//! The 256-bit Keccak variant (pre-standard padding), as used for Ethereum
//! addresses and signed message digests. This is NOT FIPS-202 SHA3-256.

use crate::entities::Hash;
use sha3::{Digest, Keccak256};

/// Keccak-256 of a single byte string.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    finalize(hasher)
}

/// Keccak-256 over the concatenation of several byte strings.
///
/// Equivalent to hashing the concatenated buffer, without allocating it.
pub fn keccak256_concat(parts: &[&[u8]]) -> Hash {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    finalize(hasher)
}

fn finalize(hasher: Keccak256) -> Hash {
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

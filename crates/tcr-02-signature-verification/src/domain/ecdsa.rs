//! # ECDSA Recovery (secp256k1)
//!
//! Recovers the Ethereum-style address behind a signature on a 32-byte
//! digest. The digest is signed as-is (no `"\x19Ethereum Signed Message"`
//! wrapping); every kind of authorization already carries its own EIP-191
//! prefix inside the digest.
//!
//! ## Security Notes
//!
//! - S must be at most `SECP256K1_HALF_ORDER` (EIP-2). Plain `ecrecover`
//!   accepts high-S signatures; rejecting them here is deliberately stricter
//!   so every authorization has exactly one accepted encoding
//! - R and S must be in [1, n-1]
//! - R must be a valid x-coordinate on the secp256k1 curve
//! - Range checks use `subtle` so they run in fixed time

use super::errors::SignatureError;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use k256::elliptic_curve::sec1::FromEncodedPoint;
use k256::{AffinePoint, EncodedPoint};
use shared_types::{keccak256, Address, EcdsaSignature, Hash};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
pub(crate) const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// n/2, rounded down.
pub(crate) const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Recover the signer of `digest`.
///
/// Checks, in order:
/// 1. R is in [1, n-1] and is an x-coordinate on the curve
/// 2. S is in [1, n-1]
/// 3. S is in the lower half of the order (EIP-2)
/// 4. v is 0, 1, 27 or 28
/// 5. public key recovery succeeds
pub fn recover_signer(digest: &Hash, signature: &EcdsaSignature) -> Result<Address, SignatureError> {
    if !is_valid_scalar(&signature.r) || !is_valid_r_coordinate(&signature.r) {
        return Err(SignatureError::InvalidFormat);
    }
    if !is_valid_scalar(&signature.s) {
        return Err(SignatureError::InvalidFormat);
    }
    if !is_low_s(&signature.s) {
        return Err(SignatureError::MalleableSignature);
    }

    let recovery_id = parse_recovery_id(signature.v)?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);
    let parsed = Signature::from_slice(&sig_bytes);
    sig_bytes.zeroize();
    let sig = parsed.map_err(|_| SignatureError::InvalidFormat)?;

    let recovered_key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    Ok(address_from_pubkey(&recovered_key))
}

/// Derive the address of a public key: the last 20 bytes of
/// `keccak256(x ‖ y)`.
#[must_use]
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let pubkey_bytes = public_key.to_encoded_point(false);
    // Skip the 0x04 uncompressed-point tag.
    Address::from_word(&keccak256(&pubkey_bytes.as_bytes()[1..]))
}

/// Flip S to the other half of the order: s' = n - s.
#[must_use]
pub fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;

    for i in (0..32).rev() {
        let diff = i32::from(SECP256K1_ORDER[i]) - i32::from(s[i]) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }

    result
}

/// Constant-time `a < b` over big-endian 32-byte integers.
fn ct_less_than(a: &[u8; 32], b: &[u8; 32]) -> Choice {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let not_decided = !(less | greater);
        let byte_less = Choice::from(u8::from(a[i] < b[i]));
        let byte_greater = Choice::from(u8::from(a[i] > b[i]));

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    less
}

/// S at most n/2.
pub(crate) fn is_low_s(s: &[u8; 32]) -> bool {
    (ct_less_than(s, &SECP256K1_HALF_ORDER) | s[..].ct_eq(&SECP256K1_HALF_ORDER[..])).into()
}

/// Scalar in [1, n-1].
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    (!is_zero & ct_less_than(scalar, &SECP256K1_ORDER)).into()
}

/// Only about half of all field elements are x-coordinates of curve points.
fn is_valid_r_coordinate(r: &[u8; 32]) -> bool {
    let mut compressed = [0u8; 33];
    compressed[0] = 0x02;
    compressed[1..].copy_from_slice(r);

    let Ok(encoded) = EncodedPoint::from_bytes(compressed) else {
        return false;
    };

    AffinePoint::from_encoded_point(&encoded).is_some().into()
}

fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(SignatureError::InvalidRecoveryId(v)),
    };

    RecoveryId::try_from(id).map_err(|_| SignatureError::InvalidRecoveryId(v))
}

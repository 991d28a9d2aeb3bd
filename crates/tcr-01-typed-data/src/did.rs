//! # ERC-1056 Signed Writes
//!
//! Pre-images for `changeOwnerSigned` and `setAttributeSigned`. Both start
//! with the EIP-191 "data with intended validator" prefix `0x19 0x00`, bind
//! the directory's own address, and carry the identity's current nonce so a
//! consumed signature can never be replayed.

use crate::encoding::PackedEncoder;
use crate::errors::TypedDataError;
use shared_types::{Address, Hash, U256};

/// EIP-191 version byte for "data with intended validator".
const INTENDED_VALIDATOR_PREFIX: [u8; 2] = [0x19, 0x00];

const CHANGE_OWNER: &str = "changeOwner";
const SET_ATTRIBUTE: &str = "setAttribute";

/// A `bytes32` attribute name.
pub type AttributeName = [u8; 32];

/// Right-pads a short ASCII name (e.g. `"TokenData"`) into a `bytes32`.
pub fn attribute_name(name: &str) -> Result<AttributeName, TypedDataError> {
    let raw = name.as_bytes();
    if raw.len() > 32 {
        return Err(TypedDataError::NameTooLong { len: raw.len() });
    }
    let mut out = [0u8; 32];
    out[..raw.len()].copy_from_slice(raw);
    Ok(out)
}

fn signed_write(directory: &Address, nonce: U256, identity: &Address) -> PackedEncoder {
    PackedEncoder::new()
        .bytes(&INTENDED_VALIDATOR_PREFIX)
        .address(directory)
        .u256(nonce)
        .address(identity)
}

/// Pre-image of an ownership-transfer authorization.
#[must_use]
pub fn change_owner_preimage(
    directory: &Address,
    nonce: U256,
    identity: &Address,
    new_owner: &Address,
) -> Vec<u8> {
    signed_write(directory, nonce, identity)
        .text(CHANGE_OWNER)
        .address(new_owner)
        .finish()
}

/// Digest signed by the identity's controller to hand control to `new_owner`.
#[must_use]
pub fn change_owner_digest(
    directory: &Address,
    nonce: U256,
    identity: &Address,
    new_owner: &Address,
) -> Hash {
    signed_write(directory, nonce, identity)
        .text(CHANGE_OWNER)
        .address(new_owner)
        .digest()
}

/// Pre-image of an attribute-set authorization.
#[must_use]
pub fn set_attribute_preimage(
    directory: &Address,
    nonce: U256,
    identity: &Address,
    name: &AttributeName,
    value: &[u8],
    validity: U256,
) -> Vec<u8> {
    signed_write(directory, nonce, identity)
        .text(SET_ATTRIBUTE)
        .bytes(name)
        .bytes(value)
        .u256(validity)
        .finish()
}

/// Digest signed by the identity's controller to write `name = value`.
#[must_use]
pub fn set_attribute_digest(
    directory: &Address,
    nonce: U256,
    identity: &Address,
    name: &AttributeName,
    value: &[u8],
    validity: U256,
) -> Hash {
    signed_write(directory, nonce, identity)
        .text(SET_ATTRIBUTE)
        .bytes(name)
        .bytes(value)
        .u256(validity)
        .digest()
}

//! # Encoding Rules
//!
//! Two encodings appear in signed payloads:
//!
//! - **ABI words** (EIP-712 struct and domain hashing): every field occupies a
//!   32-byte word. Integers are big-endian and left-padded with zeros,
//!   addresses are 20 bytes left-padded to 32, booleans are 0 or 1.
//! - **Tight packing** (ERC-1056 signed writes): fields are concatenated at
//!   their natural width. Addresses take 20 bytes, `uint256` takes 32 bytes
//!   big-endian, strings and `bytes` contribute their raw contents.

use shared_types::{keccak256, Address, Hash, U256};

/// A `uint256` as a 32-byte big-endian word.
#[must_use]
pub fn abi_u256(value: U256) -> [u8; 32] {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    word
}

/// An address left-padded to a 32-byte word.
#[must_use]
pub fn abi_address(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

/// A boolean as a 32-byte word (0 or 1 in the last byte).
#[must_use]
pub fn abi_bool(value: bool) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[31] = u8::from(value);
    word
}

/// Builder for tightly packed pre-images.
#[derive(Debug, Clone, Default)]
pub struct PackedEncoder {
    buf: Vec<u8>,
}

impl PackedEncoder {
    /// Create an empty encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single byte.
    #[must_use]
    pub fn byte(mut self, value: u8) -> Self {
        self.buf.push(value);
        self
    }

    /// Append raw bytes unchanged.
    #[must_use]
    pub fn bytes(mut self, data: &[u8]) -> Self {
        self.buf.extend_from_slice(data);
        self
    }

    /// Append a 20-byte address (no padding).
    #[must_use]
    pub fn address(self, address: &Address) -> Self {
        self.bytes(address.as_bytes())
    }

    /// Append a 32-byte big-endian `uint256`.
    #[must_use]
    pub fn u256(self, value: U256) -> Self {
        self.bytes(&abi_u256(value))
    }

    /// Append the UTF-8 bytes of a string (no length prefix).
    #[must_use]
    pub fn text(self, value: &str) -> Self {
        self.bytes(value.as_bytes())
    }

    /// Bytes appended so far.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the encoder, returning the pre-image.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    /// Keccak-256 of the pre-image.
    #[must_use]
    pub fn digest(&self) -> Hash {
        keccak256(&self.buf)
    }
}

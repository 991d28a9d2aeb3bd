//! # Core Value Objects
//!
//! - **Identity**: `Address` (20 bytes), the key of identities, members,
//!   token holders and contracts alike.
//! - **Crypto**: `Hash` (32 bytes), `EcdsaSignature` (r, s, v).
//! - **Accounting**: `U256` amounts and `Timestamp` seconds.

use crate::errors::ParseError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

/// A 32-byte Keccak-256 hash.
pub type Hash = [u8; 32];

/// Seconds since the Unix epoch, as reported by the host clock.
pub type Timestamp = u64;

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte Ethereum-style address.
///
/// Serialized as a `0x`-prefixed lowercase hex string so configuration files
/// and event logs stay readable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address (0x0000...0000).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == 20 {
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(slice);
            Some(Self(bytes))
        } else {
            None
        }
    }

    /// Takes the low 20 bytes of a 32-byte word (e.g. a Keccak-256 of a public key).
    #[must_use]
    pub fn from_word(word: &Hash) -> Self {
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&word[12..]);
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Full lowercase hex form with `0x` prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[18..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped).map_err(|e| ParseError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes).ok_or(ParseError::InvalidLength {
            expected: 20,
            actual: bytes.len(),
        })
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; 20] {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// ECDSA SIGNATURE (secp256k1, recoverable)
// =============================================================================

/// Recoverable ECDSA signature on the secp256k1 curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

impl EcdsaSignature {
    /// Splits a 65-byte `r || s || v` signature.
    #[must_use]
    pub fn from_rsv(bytes: &[u8; 65]) -> Self {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Self { r, s, v: bytes[64] }
    }

    /// Joins into the 65-byte `r || s || v` form.
    #[must_use]
    pub fn to_rsv(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_parse_and_format() {
        let addr: Address = "0x90F8bf6A479f320ead074411a4B0e7944Ea8c9C1".parse().unwrap();
        assert_eq!(addr.to_hex(), "0x90f8bf6a479f320ead074411a4b0e7944ea8c9c1");
        assert_eq!(format!("{addr}"), "0x90f8bf6a...c9c1");
    }

    #[test]
    fn test_address_parse_rejects_wrong_length() {
        let err = "0x1234".parse::<Address>().unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidLength {
                expected: 20,
                actual: 2
            }
        );
        assert!(matches!(
            "0xzz".parse::<Address>(),
            Err(ParseError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_address_from_word_takes_low_bytes() {
        let mut word = [0xAAu8; 32];
        word[12..].copy_from_slice(&[0x11u8; 20]);
        assert_eq!(Address::from_word(&word), Address::new([0x11; 20]));
    }

    #[test]
    fn test_address_serde_is_hex_string() {
        let addr = Address::new([0xAB; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "ab".repeat(20)));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn test_signature_rsv_layout() {
        let sig = EcdsaSignature {
            r: [1u8; 32],
            s: [2u8; 32],
            v: 27,
        };
        let bytes = sig.to_rsv();
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[63], 2);
        assert_eq!(bytes[64], 27);
        assert_eq!(EcdsaSignature::from_rsv(&bytes), sig);
    }
}

//! # EIP-712 Permit
//!
//! Two-stage hashing for the asset's `permit`: a struct hash over the permit
//! fields, bound to the asset contract through a domain separator.
//!
//! ```text
//! domainSeparator = keccak256(DOMAIN_TYPEHASH ‖ keccak256(name) ‖ keccak256(version) ‖ chainId ‖ asset)
//! structHash      = keccak256(PERMIT_TYPEHASH ‖ holder ‖ spender ‖ nonce ‖ expiry ‖ allowed)
//! digest          = keccak256(0x19 0x01 ‖ domainSeparator ‖ structHash)
//! ```

use crate::encoding::{abi_address, abi_bool, abi_u256};
use serde::{Deserialize, Serialize};
use shared_types::{keccak256, keccak256_concat, Address, Hash, U256};

/// `keccak256("EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)")`
pub const EIP712_DOMAIN_TYPEHASH: Hash = [
    0x8B, 0x73, 0xC3, 0xC6, 0x9B, 0xB8, 0xFE, 0x3D, 0x51, 0x2E, 0xCC, 0x4C, 0xF7, 0x59, 0xCC, 0x79,
    0x23, 0x9F, 0x7B, 0x17, 0x9B, 0x0F, 0xFA, 0xCA, 0xA9, 0xA7, 0x5D, 0x52, 0x2B, 0x39, 0x40, 0x0F,
];

/// `keccak256("Permit(address holder,address spender,uint256 nonce,uint256 expiry,bool allowed)")`
pub const PERMIT_TYPEHASH: Hash = [
    0xEA, 0x2A, 0xA0, 0xA1, 0xBE, 0x11, 0xA0, 0x7E, 0xD8, 0x6D, 0x75, 0x5C, 0x93, 0x46, 0x7F, 0x4F,
    0x82, 0x36, 0x2B, 0x45, 0x23, 0x71, 0xD1, 0xBA, 0x94, 0xD1, 0x71, 0x51, 0x23, 0x51, 0x1A, 0xCB,
];

/// EIP-191 version byte for structured data.
const STRUCTURED_DATA_PREFIX: [u8; 2] = [0x19, 0x01];

/// The asset's EIP-712 signing domain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eip712Domain {
    /// Asset name, e.g. `"Dai Stablecoin"`.
    pub name: String,
    /// Domain version, e.g. `"1"`.
    pub version: String,
    /// Chain the asset lives on.
    pub chain_id: U256,
    /// Address of the asset contract.
    pub verifying_contract: Address,
}

impl Eip712Domain {
    /// DAI-style domain (`"Dai Stablecoin"`, version `"1"`).
    #[must_use]
    pub fn dai(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            name: "Dai Stablecoin".to_string(),
            version: "1".to_string(),
            chain_id: U256::from(chain_id),
            verifying_contract,
        }
    }

    /// The domain separator for this domain.
    #[must_use]
    pub fn separator(&self) -> Hash {
        domain_separator(self)
    }
}

/// Fields of a DAI-style permit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitMessage {
    /// Owner of the funds granting the allowance.
    pub holder: Address,
    /// Party allowed to move the funds.
    pub spender: Address,
    /// The holder's current permit nonce.
    pub nonce: U256,
    /// Expiry timestamp; zero means no expiry.
    pub expiry: U256,
    /// `true` grants an unlimited allowance, `false` revokes it.
    pub allowed: bool,
}

/// Hash of the domain fields, binding signatures to one asset on one chain.
#[must_use]
pub fn domain_separator(domain: &Eip712Domain) -> Hash {
    keccak256_concat(&[
        &EIP712_DOMAIN_TYPEHASH,
        &keccak256(domain.name.as_bytes()),
        &keccak256(domain.version.as_bytes()),
        &abi_u256(domain.chain_id),
        &abi_address(&domain.verifying_contract),
    ])
}

/// Struct hash of a permit message.
#[must_use]
pub fn permit_struct_hash(message: &PermitMessage) -> Hash {
    keccak256_concat(&[
        &PERMIT_TYPEHASH,
        &abi_address(&message.holder),
        &abi_address(&message.spender),
        &abi_u256(message.nonce),
        &abi_u256(message.expiry),
        &abi_bool(message.allowed),
    ])
}

/// Final digest the holder signs.
#[must_use]
pub fn permit_digest(domain_separator: &Hash, message: &PermitMessage) -> Hash {
    keccak256_concat(&[
        &STRUCTURED_DATA_PREFIX,
        domain_separator,
        &permit_struct_hash(message),
    ])
}

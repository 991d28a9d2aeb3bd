//! # Typed Data (TCR-01)
//!
//! Builds the exact byte sequences that are hashed and signed off-line for the
//! three authorization kinds the registry settles:
//!
//! | Kind | Pre-image | Encoding |
//! |------|-----------|----------|
//! | Ownership transfer | `0x19 0x00 ‖ directory ‖ nonce ‖ identity ‖ "changeOwner" ‖ newOwner` | tightly packed |
//! | Attribute set | `0x19 0x00 ‖ directory ‖ nonce ‖ identity ‖ "setAttribute" ‖ name ‖ value ‖ validity` | tightly packed |
//! | Permit | `0x19 0x01 ‖ domainSeparator ‖ structHash` | EIP-712 (ABI words) |
//!
//! ## Determinism
//!
//! Every digest is a pure function of its inputs. The `0x1900` / `0x1901`
//! prefixes and the embedded function names keep the kinds mutually
//! non-replayable; a single changed byte in any field changes the digest.

pub mod builder;
pub mod did;
pub mod encoding;
pub mod errors;
pub mod permit;

pub use builder::{AuthorizationKind, DigestBuilder};
pub use did::{
    attribute_name, change_owner_digest, change_owner_preimage, set_attribute_digest,
    set_attribute_preimage, AttributeName,
};
pub use encoding::{abi_address, abi_bool, abi_u256, PackedEncoder};
pub use errors::TypedDataError;
pub use permit::{
    domain_separator, permit_digest, permit_struct_hash, Eip712Domain, PermitMessage,
    EIP712_DOMAIN_TYPEHASH, PERMIT_TYPEHASH,
};

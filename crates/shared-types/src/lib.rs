//! # Shared Types Crate
//!
//! Value objects used across the registry workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every crate speaks in these types, so an
//!   `Address` produced by signature recovery can key a member table directly.
//! - **Byte-exact**: addresses are 20 raw bytes and hashes 32 raw bytes; all
//!   encoding into signed payloads happens in `tcr-01-typed-data`.

pub mod entities;
pub mod errors;
pub mod hashing;

pub use entities::*;
pub use errors::*;
pub use hashing::{keccak256, keccak256_concat};

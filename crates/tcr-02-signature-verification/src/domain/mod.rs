//! # Domain Layer
//!
//! Pure cryptographic and bookkeeping logic with no I/O dependencies.

pub mod ecdsa;
pub mod entities;
pub mod errors;
pub mod nonces;
pub mod signer;

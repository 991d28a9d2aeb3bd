//! # Signature Verification (TCR-02)
//!
//! Turns a `(digest, signature)` pair into a settled authorization: the signer
//! is recovered, compared against the party entitled to authorize, and the
//! identity's nonce is consumed so the same authorization can never land twice.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): curve checks, recovery, nonce ledger, signer
//! - **Ports Layer** (`ports/`): the `SignerRecovery` seam
//! - **Adapters** (`adapters/`): the k256-backed recovery
//! - **Service Layer** (`service.rs`): `SignatureVerifier`
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: signatures with high S values are rejected
//! - **Scalar Range Validation**: R and S must be in [1, n-1]
//! - **Replay Protection**: a nonce is consumed only when verification succeeds

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::Secp256k1Recovery;
pub use domain::ecdsa::{address_from_pubkey, invert_s, recover_signer};
pub use domain::entities::SignedAuthorization;
pub use domain::errors::{AuthorizationError, SignatureError};
pub use domain::nonces::NonceLedger;
pub use domain::signer::Secp256k1Signer;
pub use ports::outbound::SignerRecovery;
pub use service::SignatureVerifier;

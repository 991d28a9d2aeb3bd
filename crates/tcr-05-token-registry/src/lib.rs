//! # tcr-05-token-registry
//!
//! Token-curated membership registry. Identities join by staking an admission
//! fee in a stable token; members challenge each other, vote with one vote
//! per identity they control, and a successful challenge removes the
//! challengee and pays the challenger's depositor.
//!
//! ## Overview
//!
//! - **Signed admission**: one atomic operation consumes a DAI permit from the
//!   fee payer, an attribute write and an ownership transfer from the
//!   identity, and stakes the fee in the reserve bank
//! - **Challenges**: `NoChallenge -> Active -> Resolved(removed | retained)`,
//!   ties and empty ballots favour the incumbent
//! - **Reserve conservation**: the bank ledger always equals the staked fees
//!   of live members plus deposits of open challenges
//!
//! ## Architecture
//!
//! ```text
//! host ──TokenRegistryApi──→ TokenRegistryService
//!                                  │  StateTransaction over RegistryState
//!                                  ├── IdentityDirectory ──→ DidDirectoryAdapter (tcr-03)
//!                                  ├── TransferableAsset ──→ StableTokenAdapter (tcr-04)
//!                                  └── Clock            ──→ SystemClock / ManualClock
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use tcr_05_token_registry::prelude::*;
//!
//! let mut registry = InMemoryTokenRegistry::in_memory(
//!     RegistryConfig::from_env()?,
//!     &TokenDomain::from_env()?,
//!     directory_address,
//!     SystemClock,
//! )?;
//!
//! let nonces = registry.admission_nonces(&identity.address(), &payer.address());
//! let request = signer.sign_admission(&identity, &payer, sponsor, &data, nonces)?;
//! let member = registry.admit_with_authorizations(request)?;
//! ```

pub mod adapters;
pub mod client;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod metrics;
pub mod ports;
pub mod service;

pub use adapters::{DidDirectoryAdapter, ManualClock, StableTokenAdapter, SystemClock};
pub use client::{AdmissionNonces, AdmissionSigner, MemberData};
pub use config::{RegistryConfig, TokenDomain};
pub use domain::entities::{
    Challenge, ChallengeId, ChallengeOutcome, Member, MemberId, VoteChoice, NO_CHALLENGE,
};
pub use domain::reserve_bank::ReserveBank;
pub use domain::state::RegistryState;
pub use errors::{ConfigError, RegistryError, RegistryResult};
pub use events::RegistryEvent;
pub use ports::inbound::{AdmissionRequest, SignedAttribute, SignedPermit, TokenRegistryApi};
pub use ports::outbound::{AssetError, Clock, DirectoryError, IdentityDirectory, TransferableAsset};
pub use service::{InMemoryTokenRegistry, SharedTokenRegistry, TokenRegistryService};

/// Everything a host needs to drive the registry.
pub mod prelude {
    pub use crate::adapters::{ManualClock, SystemClock};
    pub use crate::client::{AdmissionNonces, AdmissionSigner, MemberData};
    pub use crate::config::{RegistryConfig, TokenDomain};
    pub use crate::domain::entities::{ChallengeId, ChallengeOutcome, MemberId, VoteChoice};
    pub use crate::errors::{RegistryError, RegistryResult};
    pub use crate::events::RegistryEvent;
    pub use crate::ports::inbound::TokenRegistryApi;
    pub use crate::service::{InMemoryTokenRegistry, SharedTokenRegistry, TokenRegistryService};
    pub use tcr_02_signature_verification::Secp256k1Signer;
}

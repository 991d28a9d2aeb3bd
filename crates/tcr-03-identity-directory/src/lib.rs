//! # Identity Directory (TCR-03)
//!
//! An in-process ERC-1056 registry. Every identity is owned by itself until
//! ownership is changed; only the current owner may change the owner or
//! write attributes, either directly or through a signed authorization that
//! a relayer submits on the owner's behalf.
//!
//! Signed writes consume the identity's directory nonce. The nonce space is
//! private to this directory.

pub mod domain;
pub mod service;

pub use domain::entities::AttributeRecord;
pub use domain::errors::{DirectoryError, DirectoryResult};
pub use domain::events::DirectoryEvent;
pub use service::DidRegistry;

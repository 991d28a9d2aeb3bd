//! # Directory Events
//!
//! Emitted after every successful write. `previous_change` is the timestamp
//! of the identity's previous write (0 for the first), so an indexer can walk
//! an identity's history backwards.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Timestamp, U256};
use tcr_01_typed_data::AttributeName;

/// An ERC-1056 log entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DirectoryEvent {
    /// Ownership of `identity` moved to `owner`.
    OwnerChanged {
        identity: Address,
        owner: Address,
        previous_change: Timestamp,
    },
    /// An attribute was written on `identity`.
    AttributeChanged {
        identity: Address,
        name: AttributeName,
        value: Vec<u8>,
        valid_to: U256,
        previous_change: Timestamp,
    },
}

impl DirectoryEvent {
    /// The identity the event concerns.
    #[must_use]
    pub fn identity(&self) -> Address {
        match self {
            Self::OwnerChanged { identity, .. } | Self::AttributeChanged { identity, .. } => {
                *identity
            }
        }
    }
}

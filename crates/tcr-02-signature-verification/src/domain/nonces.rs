//! # Nonce Ledger
//!
//! One counter per identity. A counter starts at zero, only ever moves up by
//! one, and moves only when an authorization at its current value is consumed.

use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};
use std::collections::HashMap;

/// Per-identity replay counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonceLedger {
    nonces: HashMap<Address, U256>,
}

impl NonceLedger {
    /// Empty ledger; every identity is at nonce zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The nonce the next authorization for `identity` must carry.
    #[must_use]
    pub fn current(&self, identity: &Address) -> U256 {
        self.nonces.get(identity).copied().unwrap_or_default()
    }

    /// Consume the current nonce, returning it.
    pub(crate) fn advance(&mut self, identity: &Address) -> U256 {
        let slot = self.nonces.entry(*identity).or_default();
        let consumed = *slot;
        *slot = consumed.saturating_add(U256::one());
        consumed
    }
}

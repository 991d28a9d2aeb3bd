//! # Token Events

use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};

/// ERC-20 log entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TokenEvent {
    /// Tokens moved; `from` is zero for mints.
    Transfer {
        from: Address,
        to: Address,
        amount: U256,
    },
    /// An allowance was set.
    Approval {
        owner: Address,
        spender: Address,
        amount: U256,
    },
}

//! # Domain Entities

use serde::{Deserialize, Serialize};
use shared_types::{Timestamp, U256};

/// The last value written under an attribute name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRecord {
    /// Raw attribute value.
    pub value: Vec<u8>,
    /// Last second at which the attribute is valid.
    pub valid_to: U256,
}

impl AttributeRecord {
    /// True while `now` has not passed `valid_to`.
    #[must_use]
    pub fn is_valid_at(&self, now: Timestamp) -> bool {
        U256::from(now) <= self.valid_to
    }
}

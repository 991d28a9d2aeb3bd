//! # Domain Invariants
//!
//! Conservation of the reserve:
//!
//! ```text
//! reserve == Σ member.staked_fee + Σ open challenge.deposit
//! asset.balance_of(reserve address) >= reserve
//! ```
//!
//! The second is an inequality because anyone may send tokens straight to
//! the reserve address through the asset.

use crate::domain::entities::{Challenge, Member};
use crate::domain::reserve_bank::ReserveBank;
use crate::ports::outbound::TransferableAsset;
use shared_types::U256;

/// Which side of conservation broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Ledger balance differs from outstanding stakes.
    Unbacked { ledger: U256, stakes: U256 },
    /// The asset holds less than the ledger claims.
    Underfunded { ledger: U256, held: U256 },
    /// Stake sum overflowed.
    Overflow,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unbacked { ledger, stakes } => {
                write!(f, "reserve ledger {ledger} != outstanding stakes {stakes}")
            }
            Self::Underfunded { ledger, held } => {
                write!(f, "reserve ledger {ledger} > asset balance {held}")
            }
            Self::Overflow => write!(f, "stake sum overflow"),
        }
    }
}

/// Sum of fees held for members and deposits held for open challenges.
pub fn outstanding_stakes<'a>(
    members: impl IntoIterator<Item = &'a Member>,
    challenges: impl IntoIterator<Item = &'a Challenge>,
) -> Option<U256> {
    let fees = members
        .into_iter()
        .try_fold(U256::zero(), |acc, m| acc.checked_add(m.staked_fee))?;
    challenges
        .into_iter()
        .filter(|c| !c.resolved)
        .try_fold(fees, |acc, c| acc.checked_add(c.deposit))
}

/// Check conservation of the reserve.
pub fn check_conservation<'a, A: TransferableAsset>(
    bank: &ReserveBank,
    asset: &A,
    members: impl IntoIterator<Item = &'a Member>,
    challenges: impl IntoIterator<Item = &'a Challenge>,
) -> Result<(), InvariantViolation> {
    let ledger = bank.balance();
    let stakes = outstanding_stakes(members, challenges).ok_or(InvariantViolation::Overflow)?;
    if ledger != stakes {
        return Err(InvariantViolation::Unbacked { ledger, stakes });
    }
    let held = asset.balance_of(&bank.address());
    if held < ledger {
        return Err(InvariantViolation::Underfunded { ledger, held });
    }
    Ok(())
}

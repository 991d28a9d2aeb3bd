//! # Domain Entities
//!
//! Members, challenges and votes as the registry stores them.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Timestamp, U256};

use crate::errors::RegistryError;

/// A member is keyed by its identity address.
pub type MemberId = Address;

/// Challenge identifiers start at 1; 0 means "no challenge".
pub type ChallengeId = u64;

/// Sentinel for "no challenge".
pub const NO_CHALLENGE: ChallengeId = 0;

/// A live member record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Identity address in the directory.
    pub identity: MemberId,
    /// Party that controls the identity (the sponsor at admission).
    pub controller: Address,
    /// Admission time; never zero for a live member.
    pub membership_start_time: Timestamp,
    /// Admission fee held in the reserve for this member.
    pub staked_fee: U256,
    /// Open challenge against this member, or `NO_CHALLENGE`.
    pub current_challenge_id: ChallengeId,
}

impl Member {
    /// True if a challenge is linked to this member.
    #[must_use]
    pub fn has_challenge(&self) -> bool {
        self.current_challenge_id != NO_CHALLENGE
    }
}

/// A vote on a challenge. `Null` marks "has not voted".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum VoteChoice {
    #[default]
    Null = 0,
    /// Remove the challengee.
    Yes = 1,
    /// Keep the challengee.
    No = 2,
}

impl TryFrom<u8> for VoteChoice {
    type Error = RegistryError;

    /// Only `Yes` and `No` are castable; 0 and anything above 2 are rejected.
    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(Self::Yes),
            2 => Ok(Self::No),
            other => Err(RegistryError::InvalidChoice(other)),
        }
    }
}

impl VoteChoice {
    /// Label used in logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

/// How a challenge ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeOutcome {
    /// More Yes than No: the challengee was removed.
    Succeeded,
    /// Tie, zero participation, or more No: the challengee stays.
    Failed,
}

impl ChallengeOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

/// A challenge against one member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: ChallengeId,
    /// Member identity that raised the challenge.
    pub challenger: MemberId,
    /// Member identity under challenge.
    pub challengee: MemberId,
    /// Controller that paid the deposit; receives payout or refund.
    pub depositor: Address,
    pub deposit: U256,
    /// Opaque evidence supplied by the challenger.
    pub details: Vec<u8>,
    pub start_time: Timestamp,
    pub votes_for: u64,
    pub votes_against: u64,
    pub resolved: bool,
    pub outcome: Option<ChallengeOutcome>,
}

impl Challenge {
    /// Last second at which votes are accepted.
    #[must_use]
    pub fn voting_deadline(&self, vote_period_secs: u64) -> Timestamp {
        self.start_time.saturating_add(vote_period_secs)
    }

    /// Voting is open through the deadline second inclusive.
    #[must_use]
    pub fn is_voting_open(&self, now: Timestamp, vote_period_secs: u64) -> bool {
        now <= self.voting_deadline(vote_period_secs)
    }

    /// Unresolved and past the deadline.
    #[must_use]
    pub fn can_be_resolved(&self, now: Timestamp, vote_period_secs: u64) -> bool {
        !self.resolved && !self.is_voting_open(now, vote_period_secs)
    }

    /// Strict majority of Yes removes the challengee.
    #[must_use]
    pub fn tally(&self) -> ChallengeOutcome {
        if self.votes_for > self.votes_against {
            ChallengeOutcome::Succeeded
        } else {
            ChallengeOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn challenge(votes_for: u64, votes_against: u64) -> Challenge {
        Challenge {
            id: 1,
            challenger: Address::new([0x01; 20]),
            challengee: Address::new([0x02; 20]),
            depositor: Address::new([0x03; 20]),
            deposit: U256::from(10u8),
            details: Vec::new(),
            start_time: 1_000,
            votes_for,
            votes_against,
            resolved: false,
            outcome: None,
        }
    }

    #[test]
    fn test_vote_choice_from_raw() {
        assert_eq!(VoteChoice::try_from(1u8), Ok(VoteChoice::Yes));
        assert_eq!(VoteChoice::try_from(2u8), Ok(VoteChoice::No));
        assert_eq!(
            VoteChoice::try_from(0u8),
            Err(RegistryError::InvalidChoice(0))
        );
        assert_eq!(
            VoteChoice::try_from(3u8),
            Err(RegistryError::InvalidChoice(3))
        );
        assert_eq!(VoteChoice::default(), VoteChoice::Null);
    }

    #[test]
    fn test_voting_window_boundaries() {
        let c = challenge(0, 0);
        assert!(c.is_voting_open(1_100, 100));
        assert!(!c.can_be_resolved(1_100, 100));
        assert!(!c.is_voting_open(1_101, 100));
        assert!(c.can_be_resolved(1_101, 100));
    }

    #[test]
    fn test_tally_favours_incumbent() {
        assert_eq!(challenge(0, 0).tally(), ChallengeOutcome::Failed);
        assert_eq!(challenge(3, 3).tally(), ChallengeOutcome::Failed);
        assert_eq!(challenge(1, 2).tally(), ChallengeOutcome::Failed);
        assert_eq!(challenge(2, 0).tally(), ChallengeOutcome::Succeeded);
    }

    #[test]
    fn test_resolved_challenge_not_resolvable() {
        let mut c = challenge(0, 0);
        c.resolved = true;
        assert!(!c.can_be_resolved(u64::MAX, 100));
    }
}

//! # Registry Events
//!
//! Appended to the service's event log when an operation commits. A
//! rolled-back operation never emits.

use crate::domain::entities::{ChallengeId, MemberId, VoteChoice};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Timestamp, U256};
use tcr_01_typed_data::AttributeName;

/// Registry log entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RegistryEvent {
    NewMember {
        identity: MemberId,
        controller: Address,
        fee_payer: Address,
        staked_fee: U256,
        start_time: Timestamp,
    },
    MemberExited {
        identity: MemberId,
        controller: Address,
        refund: U256,
    },
    MemberDataEdited {
        identity: MemberId,
        name: AttributeName,
        value: Vec<u8>,
    },
    MemberControlTransferred {
        identity: MemberId,
        previous_controller: Address,
        new_controller: Address,
    },
    ChallengeCreated {
        challenge_id: ChallengeId,
        challenger: MemberId,
        challengee: MemberId,
        depositor: Address,
        deposit: U256,
        details: Vec<u8>,
        start_time: Timestamp,
    },
    VoteSubmitted {
        challenge_id: ChallengeId,
        voter: MemberId,
        choice: VoteChoice,
    },
    /// The challengee was removed; `payout` is deposit plus forfeited fee.
    ChallengeSucceeded {
        challenge_id: ChallengeId,
        challengee: MemberId,
        depositor: Address,
        payout: U256,
        votes_for: u64,
        votes_against: u64,
    },
    /// The challengee stays; the deposit was refunded.
    ChallengeFailed {
        challenge_id: ChallengeId,
        challengee: MemberId,
        depositor: Address,
        refund: U256,
        votes_for: u64,
        votes_against: u64,
    },
}

impl RegistryEvent {
    /// Event name, as used in the serialized `type` tag.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NewMember { .. } => "NewMember",
            Self::MemberExited { .. } => "MemberExited",
            Self::MemberDataEdited { .. } => "MemberDataEdited",
            Self::MemberControlTransferred { .. } => "MemberControlTransferred",
            Self::ChallengeCreated { .. } => "ChallengeCreated",
            Self::VoteSubmitted { .. } => "VoteSubmitted",
            Self::ChallengeSucceeded { .. } => "ChallengeSucceeded",
            Self::ChallengeFailed { .. } => "ChallengeFailed",
        }
    }
}

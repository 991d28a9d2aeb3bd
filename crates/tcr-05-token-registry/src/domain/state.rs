//! # Registry State
//!
//! Everything one operation may touch: member, challenge and vote tables,
//! the reserve ledger, and the directory and asset the registry drives. A
//! `StateTransaction` stages a clone of the whole value, so a failure at any
//! step, including inside a collaborator, leaves all of it untouched.

use crate::domain::entities::{Challenge, ChallengeId, Member, MemberId, VoteChoice};
use crate::domain::invariants::{check_conservation, InvariantViolation};
use crate::domain::reserve_bank::ReserveBank;
use crate::events::RegistryEvent;
use crate::ports::outbound::{IdentityDirectory, TransferableAsset};
use shared_types::Address;
use std::collections::{BTreeMap, HashMap};

/// Registry world state.
#[derive(Debug, Clone)]
pub struct RegistryState<D, A> {
    pub(crate) members: HashMap<MemberId, Member>,
    pub(crate) challenges: BTreeMap<ChallengeId, Challenge>,
    pub(crate) votes: HashMap<(ChallengeId, MemberId), VoteChoice>,
    pub(crate) next_challenge_id: ChallengeId,
    pub(crate) bank: ReserveBank,
    pub(crate) directory: D,
    pub(crate) asset: A,
    /// Events of the operation in flight.
    pub(crate) outbox: Vec<RegistryEvent>,
}

impl<D: IdentityDirectory, A: TransferableAsset> RegistryState<D, A> {
    /// Empty registry over the given collaborators.
    pub fn new(directory: D, asset: A, reserve_bank_address: Address) -> Self {
        Self {
            members: HashMap::new(),
            challenges: BTreeMap::new(),
            votes: HashMap::new(),
            next_challenge_id: 1,
            bank: ReserveBank::new(reserve_bank_address),
            directory,
            asset,
            outbox: Vec::new(),
        }
    }

    #[must_use]
    pub fn member(&self, identity: &Address) -> Option<&Member> {
        self.members.get(identity)
    }

    /// Live members, in no particular order.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    #[must_use]
    pub fn challenge(&self, challenge_id: ChallengeId) -> Option<&Challenge> {
        self.challenges.get(&challenge_id)
    }

    /// All challenges ever created, by id.
    pub fn challenges(&self) -> impl Iterator<Item = &Challenge> {
        self.challenges.values()
    }

    #[must_use]
    pub fn vote_of(&self, challenge_id: ChallengeId, voter: &Address) -> VoteChoice {
        self.votes
            .get(&(challenge_id, *voter))
            .copied()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn bank(&self) -> &ReserveBank {
        &self.bank
    }

    #[must_use]
    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn directory_mut(&mut self) -> &mut D {
        &mut self.directory
    }

    #[must_use]
    pub fn asset(&self) -> &A {
        &self.asset
    }

    pub fn asset_mut(&mut self) -> &mut A {
        &mut self.asset
    }

    /// Reserve conservation over the current tables.
    pub fn check_conservation(&self) -> Result<(), InvariantViolation> {
        check_conservation(
            &self.bank,
            &self.asset,
            self.members.values(),
            self.challenges.values(),
        )
    }

    pub(crate) fn emit(&mut self, event: RegistryEvent) {
        self.outbox.push(event);
    }

    pub(crate) fn take_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.outbox)
    }
}

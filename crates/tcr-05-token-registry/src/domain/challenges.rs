//! # Challenge Engine
//!
//! `NoChallenge -> Active -> Resolved(removed | retained)` per member.
//! Votes count one per member identity; a controller holding several
//! identities votes once for each.

use crate::config::RegistryConfig;
use crate::domain::entities::{
    Challenge, ChallengeId, ChallengeOutcome, MemberId, VoteChoice, NO_CHALLENGE,
};
use crate::domain::state::RegistryState;
use crate::errors::{RegistryError, RegistryResult};
use crate::events::RegistryEvent;
use crate::ports::outbound::{IdentityDirectory, TransferableAsset};
use shared_types::{Address, Timestamp};
use tracing::debug;

impl<D: IdentityDirectory, A: TransferableAsset> RegistryState<D, A> {
    /// Open a challenge against `challengee`, settling its expired one first.
    ///
    /// If that expired challenge succeeds the call fails with
    /// `ChallengeeNotMember` and the settlement rolls back with it; callers
    /// must `resolve_challenge` it first to actually remove the member.
    pub(crate) fn create_challenge(
        &mut self,
        config: &RegistryConfig,
        now: Timestamp,
        caller: &Address,
        challenger: &MemberId,
        challengee: &MemberId,
        details: Vec<u8>,
    ) -> RegistryResult<ChallengeId> {
        if challenger == challengee {
            return Err(RegistryError::SelfChallenge);
        }
        let challenger_member = self
            .members
            .get(challenger)
            .ok_or(RegistryError::ChallengerNotMember(*challenger))?;
        if challenger_member.controller != *caller {
            return Err(RegistryError::NotController {
                identity: *challenger,
                caller: *caller,
            });
        }
        let linked_id = self
            .members
            .get(challengee)
            .ok_or(RegistryError::ChallengeeNotMember(*challengee))?
            .current_challenge_id;

        if linked_id != NO_CHALLENGE {
            let pending = self
                .challenges
                .get(&linked_id)
                .filter(|linked| !linked.resolved)
                .map(|linked| linked.is_voting_open(now, config.vote_period_secs));
            match pending {
                Some(true) => {
                    return Err(RegistryError::ChallengeInProgress {
                        challengee: *challengee,
                        challenge_id: linked_id,
                    });
                }
                Some(false) => {
                    debug!(challenge_id = linked_id, "Settling expired challenge first");
                    self.settle(linked_id)?;
                    if !self.members.contains_key(challengee) {
                        return Err(RegistryError::ChallengeeNotMember(*challengee));
                    }
                }
                None => {}
            }
        }

        let deposit = config.challenge_deposit;
        self.bank
            .credit(&mut self.asset, &config.registry_address, caller, deposit)?;

        let challenge_id = self.next_challenge_id;
        self.next_challenge_id += 1;
        self.challenges.insert(
            challenge_id,
            Challenge {
                id: challenge_id,
                challenger: *challenger,
                challengee: *challengee,
                depositor: *caller,
                deposit,
                details: details.clone(),
                start_time: now,
                votes_for: 0,
                votes_against: 0,
                resolved: false,
                outcome: None,
            },
        );
        if let Some(target) = self.members.get_mut(challengee) {
            target.current_challenge_id = challenge_id;
        }
        self.emit(RegistryEvent::ChallengeCreated {
            challenge_id,
            challenger: *challenger,
            challengee: *challengee,
            depositor: *caller,
            deposit,
            details,
            start_time: now,
        });
        Ok(challenge_id)
    }

    pub(crate) fn submit_vote(
        &mut self,
        config: &RegistryConfig,
        now: Timestamp,
        caller: &Address,
        challenge_id: ChallengeId,
        choice: VoteChoice,
        voter: &MemberId,
    ) -> RegistryResult<()> {
        let challenge = self
            .challenges
            .get(&challenge_id)
            .ok_or(RegistryError::ChallengeNotFound(challenge_id))?;
        if *voter == challenge.challengee {
            return Err(RegistryError::SelfVote {
                challenge_id,
                voter: *voter,
            });
        }
        let member = self
            .members
            .get(voter)
            .ok_or(RegistryError::VoterNotMember(*voter))?;
        if member.controller != *caller {
            return Err(RegistryError::NotController {
                identity: *voter,
                caller: *caller,
            });
        }
        if self.vote_of(challenge_id, voter) != VoteChoice::Null {
            return Err(RegistryError::AlreadyVoted {
                challenge_id,
                voter: *voter,
            });
        }
        if !challenge.is_voting_open(now, config.vote_period_secs) {
            return Err(RegistryError::VotingExpired {
                challenge_id,
                deadline: challenge.voting_deadline(config.vote_period_secs),
            });
        }

        let challenge = self
            .challenges
            .get_mut(&challenge_id)
            .ok_or(RegistryError::ChallengeNotFound(challenge_id))?;
        match choice {
            VoteChoice::Yes => challenge.votes_for += 1,
            VoteChoice::No => challenge.votes_against += 1,
            VoteChoice::Null => return Err(RegistryError::InvalidChoice(VoteChoice::Null as u8)),
        }
        self.votes.insert((challenge_id, *voter), choice);
        self.emit(RegistryEvent::VoteSubmitted {
            challenge_id,
            voter: *voter,
            choice,
        });
        Ok(())
    }

    /// Applies every vote in order; the first rejection aborts the batch.
    pub(crate) fn submit_votes_batch(
        &mut self,
        config: &RegistryConfig,
        now: Timestamp,
        caller: &Address,
        challenge_id: ChallengeId,
        choices: &[VoteChoice],
        voters: &[MemberId],
    ) -> RegistryResult<()> {
        if choices.len() != voters.len() {
            return Err(RegistryError::ArrayLengthMismatch {
                choices: choices.len(),
                voters: voters.len(),
            });
        }
        for (choice, voter) in choices.iter().zip(voters) {
            self.submit_vote(config, now, caller, challenge_id, *choice, voter)?;
        }
        Ok(())
    }

    pub(crate) fn resolve_challenge(
        &mut self,
        config: &RegistryConfig,
        now: Timestamp,
        challenge_id: ChallengeId,
    ) -> RegistryResult<ChallengeOutcome> {
        let challenge = self
            .challenges
            .get(&challenge_id)
            .ok_or(RegistryError::ChallengeNotFound(challenge_id))?;
        if challenge.resolved {
            return Err(RegistryError::ChallengeAlreadyResolved(challenge_id));
        }
        if challenge.is_voting_open(now, config.vote_period_secs) {
            return Err(RegistryError::NotReadyToResolve {
                challenge_id,
                resolvable_after: challenge.voting_deadline(config.vote_period_secs),
            });
        }
        self.settle(challenge_id)
    }

    /// Pays out a closed challenge. Callers check the voting window.
    fn settle(&mut self, challenge_id: ChallengeId) -> RegistryResult<ChallengeOutcome> {
        let challenge = self
            .challenges
            .get(&challenge_id)
            .cloned()
            .ok_or(RegistryError::ChallengeNotFound(challenge_id))?;
        let outcome = challenge.tally();

        match outcome {
            ChallengeOutcome::Succeeded => {
                let removed = self.members.remove(&challenge.challengee).ok_or_else(|| {
                    RegistryError::InvariantViolation(format!(
                        "challengee {:?} of challenge {challenge_id} is not a member",
                        challenge.challengee
                    ))
                })?;
                let payout = challenge
                    .deposit
                    .checked_add(removed.staked_fee)
                    .ok_or_else(|| {
                        RegistryError::InvariantViolation("payout overflow".to_string())
                    })?;
                self.bank
                    .debit(&mut self.asset, payout, &challenge.depositor)?;
                self.emit(RegistryEvent::ChallengeSucceeded {
                    challenge_id,
                    challengee: challenge.challengee,
                    depositor: challenge.depositor,
                    payout,
                    votes_for: challenge.votes_for,
                    votes_against: challenge.votes_against,
                });
            }
            ChallengeOutcome::Failed => {
                self.bank
                    .debit(&mut self.asset, challenge.deposit, &challenge.depositor)?;
                if let Some(member) = self.members.get_mut(&challenge.challengee) {
                    if member.current_challenge_id == challenge_id {
                        member.current_challenge_id = NO_CHALLENGE;
                    }
                }
                self.emit(RegistryEvent::ChallengeFailed {
                    challenge_id,
                    challengee: challenge.challengee,
                    depositor: challenge.depositor,
                    refund: challenge.deposit,
                    votes_for: challenge.votes_for,
                    votes_against: challenge.votes_against,
                });
            }
        }

        if let Some(stored) = self.challenges.get_mut(&challenge_id) {
            stored.resolved = true;
            stored.outcome = Some(outcome);
        }
        Ok(outcome)
    }
}

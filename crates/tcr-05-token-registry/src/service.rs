//! # Token Registry Service
//!
//! Runs every mutating operation as one atomic step over the whole world
//! state: the clock is read once, a `StateTransaction` stages a copy of the
//! registry tables, reserve bank, directory and asset, the operation mutates
//! the copy, and only a fully successful operation is committed. Events are
//! published and metrics recorded after the commit.

use crate::adapters::{DidDirectoryAdapter, StableTokenAdapter};
use crate::client::AdmissionNonces;
use crate::config::{RegistryConfig, TokenDomain};
use crate::domain::entities::{
    Challenge, ChallengeId, ChallengeOutcome, Member, MemberId, VoteChoice, NO_CHALLENGE,
};
use crate::domain::state::RegistryState;
use crate::domain::transaction::StateTransaction;
use crate::errors::{ConfigError, RegistryError, RegistryResult};
use crate::events::RegistryEvent;
use crate::metrics;
use crate::ports::inbound::{AdmissionRequest, SignedAttribute, TokenRegistryApi};
use crate::ports::outbound::{Clock, IdentityDirectory, TransferableAsset};
use parking_lot::Mutex;
use shared_types::{Address, Timestamp, U256};
use std::sync::Arc;
use tcr_02_signature_verification::SignedAuthorization;
use tcr_03_identity_directory::DidRegistry;
use tcr_04_stable_token::StableToken;
use tracing::{debug, info, instrument, warn};

/// A registry shared across threads; the mutex serializes operations.
pub type SharedTokenRegistry<D, A, C> = Arc<Mutex<TokenRegistryService<D, A, C>>>;

/// Registry over the in-process DID directory and stable token.
pub type InMemoryTokenRegistry<C> = TokenRegistryService<DidDirectoryAdapter, StableTokenAdapter, C>;

pub struct TokenRegistryService<D, A, C>
where
    D: IdentityDirectory,
    A: TransferableAsset,
    C: Clock,
{
    config: RegistryConfig,
    state: RegistryState<D, A>,
    clock: C,
    events: Vec<RegistryEvent>,
}

impl<D, A, C> TokenRegistryService<D, A, C>
where
    D: IdentityDirectory,
    A: TransferableAsset,
    C: Clock,
{
    /// Build a registry after validating its constants.
    pub fn new(config: RegistryConfig, directory: D, asset: A, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            registry = %config.registry_address,
            reserve_bank = %config.reserve_bank_address,
            admission_fee = %config.admission_fee,
            challenge_deposit = %config.challenge_deposit,
            vote_period_secs = config.vote_period_secs,
            "Token registry initialized"
        );
        let state = RegistryState::new(directory, asset, config.reserve_bank_address);
        Ok(Self {
            config,
            state,
            clock,
            events: Vec::new(),
        })
    }

    /// Wrap for sharing across threads.
    pub fn shared(self) -> SharedTokenRegistry<D, A, C> {
        Arc::new(Mutex::new(self))
    }

    /// Committed events, oldest first.
    pub fn events(&self) -> &[RegistryEvent] {
        &self.events
    }

    pub fn state(&self) -> &RegistryState<D, A> {
        &self.state
    }

    pub fn directory(&self) -> &D {
        self.state.directory()
    }

    /// Direct access for identity updates made outside the registry.
    pub fn directory_mut(&mut self) -> &mut D {
        self.state.directory_mut()
    }

    pub fn asset(&self) -> &A {
        self.state.asset()
    }

    /// Direct access for transfers made outside the registry.
    pub fn asset_mut(&mut self) -> &mut A {
        self.state.asset_mut()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Nonces the next admission of `identity` paid by `fee_payer` must use.
    pub fn admission_nonces(&self, identity: &Address, fee_payer: &Address) -> AdmissionNonces {
        AdmissionNonces {
            directory: self.state.directory().current_nonce(identity),
            permit: self.state.asset().nonces(fee_payer),
        }
    }

    fn atomically<T>(
        &mut self,
        operation: &'static str,
        op: impl FnOnce(&mut RegistryState<D, A>, &RegistryConfig, Timestamp) -> RegistryResult<T>,
    ) -> RegistryResult<T> {
        let now = self.clock.now();
        let mut tx = StateTransaction::begin(&mut self.state);

        let result = match op(tx.state_mut(), &self.config, now) {
            Ok(value) => verify_conservation(tx.state()).map(|()| value),
            Err(err) => Err(err),
        };

        match result {
            Ok(value) => {
                let emitted = tx.state_mut().take_events();
                tx.commit();
                self.publish(emitted);
                Ok(value)
            }
            Err(err) => {
                drop(tx);
                warn!(operation, code = err.code(), error = %err, "Registry operation rejected");
                metrics::record_rejection(err.code());
                Err(err)
            }
        }
    }

    fn publish(&mut self, emitted: Vec<RegistryEvent>) {
        for event in &emitted {
            match event {
                RegistryEvent::NewMember {
                    identity,
                    controller,
                    staked_fee,
                    ..
                } => {
                    info!(identity = %identity, controller = %controller, %staked_fee, "Member admitted");
                    metrics::record_admission();
                }
                RegistryEvent::MemberExited {
                    identity, refund, ..
                } => {
                    info!(identity = %identity, %refund, "Member exited");
                    metrics::record_exit();
                }
                RegistryEvent::MemberDataEdited { identity, .. } => {
                    debug!(identity = %identity, "Member data edited");
                }
                RegistryEvent::MemberControlTransferred {
                    identity,
                    new_controller,
                    ..
                } => {
                    info!(identity = %identity, new_controller = %new_controller, "Member control transferred");
                }
                RegistryEvent::ChallengeCreated {
                    challenge_id,
                    challenger,
                    challengee,
                    ..
                } => {
                    info!(
                        challenge_id,
                        challenger = %challenger,
                        challengee = %challengee,
                        "Challenge created"
                    );
                    metrics::record_challenge_created();
                }
                RegistryEvent::VoteSubmitted {
                    challenge_id,
                    voter,
                    choice,
                } => {
                    debug!(challenge_id, voter = %voter, choice = choice.as_str(), "Vote recorded");
                    metrics::record_vote(choice.as_str());
                }
                RegistryEvent::ChallengeSucceeded {
                    challenge_id,
                    challengee,
                    payout,
                    ..
                } => {
                    info!(challenge_id, challengee = %challengee, %payout, "Challenge succeeded, member removed");
                    metrics::record_resolution(ChallengeOutcome::Succeeded.as_str());
                }
                RegistryEvent::ChallengeFailed {
                    challenge_id,
                    challengee,
                    refund,
                    ..
                } => {
                    info!(challenge_id, challengee = %challengee, %refund, "Challenge failed, member retained");
                    metrics::record_resolution(ChallengeOutcome::Failed.as_str());
                }
            }
        }
        metrics::set_reserve_balance(self.state.bank().balance());
        self.events.extend(emitted);
    }
}

impl<C: Clock> InMemoryTokenRegistry<C> {
    /// Registry over a fresh DID directory at `directory_address` and a fresh
    /// stable token in `token`'s domain.
    pub fn in_memory(
        config: RegistryConfig,
        token: &TokenDomain,
        directory_address: Address,
        clock: C,
    ) -> Result<Self, ConfigError> {
        Self::new(
            config,
            DidDirectoryAdapter::new(DidRegistry::new(directory_address)),
            StableTokenAdapter::new(StableToken::new(token.to_eip712())),
            clock,
        )
    }
}

/// Reserve conservation, checked before commit in debug builds.
fn verify_conservation<D, A>(state: &RegistryState<D, A>) -> RegistryResult<()>
where
    D: IdentityDirectory,
    A: TransferableAsset,
{
    if cfg!(debug_assertions) {
        state
            .check_conservation()
            .map_err(|violation| RegistryError::InvariantViolation(violation.to_string()))?;
    }
    Ok(())
}

impl<D, A, C> TokenRegistryApi for TokenRegistryService<D, A, C>
where
    D: IdentityDirectory,
    A: TransferableAsset,
    C: Clock,
{
    #[instrument(skip_all, fields(identity = %request.identity, sponsor = %request.sponsor))]
    fn admit_with_authorizations(&mut self, request: AdmissionRequest) -> RegistryResult<MemberId> {
        self.atomically("admit", |state, config, now| state.admit(config, now, &request))
    }

    #[instrument(skip_all, fields(caller = %caller, identity = %identity))]
    fn exit(&mut self, caller: &Address, identity: &Address) -> RegistryResult<()> {
        self.atomically("exit", |state, _, _| state.exit(caller, identity).map(|_| ()))
    }

    #[instrument(skip_all, fields(identity = %identity))]
    fn edit_member_data(&mut self, identity: &Address, attribute: SignedAttribute) -> RegistryResult<()> {
        self.atomically("edit_member_data", |state, _, now| {
            state.edit_member_data(now, identity, &attribute)
        })
    }

    #[instrument(skip_all, fields(identity = %identity, new_controller = %new_controller))]
    fn transfer_member_control(
        &mut self,
        identity: &Address,
        new_controller: &Address,
        authorization: SignedAuthorization,
    ) -> RegistryResult<()> {
        self.atomically("transfer_member_control", |state, _, now| {
            state.transfer_member_control(now, identity, new_controller, &authorization)
        })
    }

    #[instrument(skip_all, fields(challenger = %challenger, challengee = %challengee))]
    fn create_challenge(
        &mut self,
        caller: &Address,
        challenger: &MemberId,
        challengee: &MemberId,
        details: Vec<u8>,
    ) -> RegistryResult<ChallengeId> {
        self.atomically("create_challenge", |state, config, now| {
            state.create_challenge(config, now, caller, challenger, challengee, details)
        })
    }

    #[instrument(skip_all, fields(challenge_id = challenge_id, voter = %voter))]
    fn submit_vote(
        &mut self,
        caller: &Address,
        challenge_id: ChallengeId,
        choice: VoteChoice,
        voter: &MemberId,
    ) -> RegistryResult<()> {
        self.atomically("submit_vote", |state, config, now| {
            state.submit_vote(config, now, caller, challenge_id, choice, voter)
        })
    }

    #[instrument(skip_all, fields(challenge_id = challenge_id, votes = voters.len()))]
    fn submit_votes_batch(
        &mut self,
        caller: &Address,
        challenge_id: ChallengeId,
        choices: &[VoteChoice],
        voters: &[MemberId],
    ) -> RegistryResult<()> {
        self.atomically("submit_votes_batch", |state, config, now| {
            state.submit_votes_batch(config, now, caller, challenge_id, choices, voters)
        })
    }

    fn challenge_can_be_resolved(&self, challenge_id: ChallengeId) -> bool {
        let now = self.clock.now();
        self.state
            .challenge(challenge_id)
            .is_some_and(|c| c.can_be_resolved(now, self.config.vote_period_secs))
    }

    #[instrument(skip(self))]
    fn resolve_challenge(&mut self, challenge_id: ChallengeId) -> RegistryResult<ChallengeOutcome> {
        self.atomically("resolve_challenge", |state, config, now| {
            state.resolve_challenge(config, now, challenge_id)
        })
    }

    fn is_member(&self, identity: &Address) -> bool {
        self.state.member(identity).is_some()
    }

    fn membership_start_time(&self, identity: &Address) -> Timestamp {
        self.state
            .member(identity)
            .map_or(0, |m| m.membership_start_time)
    }

    fn member(&self, identity: &Address) -> Option<Member> {
        self.state.member(identity).cloned()
    }

    fn member_challenge_exists(&self, identity: &Address) -> bool {
        self.challenge_id_of(identity) != NO_CHALLENGE
    }

    fn challenge_id_of(&self, identity: &Address) -> ChallengeId {
        self.state
            .member(identity)
            .map_or(NO_CHALLENGE, |m| m.current_challenge_id)
    }

    fn challenge(&self, challenge_id: ChallengeId) -> Option<Challenge> {
        self.state.challenge(challenge_id).cloned()
    }

    fn vote_of(&self, challenge_id: ChallengeId, voter: &Address) -> VoteChoice {
        self.state.vote_of(challenge_id, voter)
    }

    fn reserve_balance(&self) -> U256 {
        self.state.bank().balance()
    }

    fn config(&self) -> &RegistryConfig {
        &self.config
    }
}

//! # Inbound Ports (Driving Ports / API)
//!
//! What hosts and sponsors call. Every mutating operation is atomic: it either
//! commits in full or returns an error and changes nothing.

use crate::config::RegistryConfig;
use crate::domain::entities::{Challenge, ChallengeId, ChallengeOutcome, Member, MemberId, VoteChoice};
use crate::errors::RegistryResult;
use serde::{Deserialize, Serialize};
use shared_types::{Address, EcdsaSignature, Timestamp, U256};
use tcr_01_typed_data::{AttributeName, PermitMessage};
use tcr_02_signature_verification::SignedAuthorization;

/// An attribute write signed by the identity's current controller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedAttribute {
    pub name: AttributeName,
    pub value: Vec<u8>,
    /// Seconds the attribute stays valid after it is written.
    pub validity: U256,
    pub authorization: SignedAuthorization,
}

/// A fee payer's permit naming the registry as spender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedPermit {
    pub holder: Address,
    pub nonce: U256,
    /// Zero means no expiry.
    pub expiry: U256,
    pub allowed: bool,
    pub signature: EcdsaSignature,
}

impl SignedPermit {
    /// The permit message as the asset hashes it.
    #[must_use]
    pub fn message(&self, spender: Address) -> PermitMessage {
        PermitMessage {
            holder: self.holder,
            spender,
            nonce: self.nonce,
            expiry: self.expiry,
            allowed: self.allowed,
        }
    }
}

/// Everything a sponsor submits to admit one identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionRequest {
    /// Identity being admitted.
    pub identity: Address,
    /// Relayer; becomes the identity's controller.
    pub sponsor: Address,
    /// Member data, signed at the identity's directory nonce `n`.
    pub attribute: SignedAttribute,
    /// Hand-over of control to `sponsor`, signed at nonce `n + 1`.
    pub ownership: SignedAuthorization,
    /// Fee payer's permit for the admission fee.
    pub permit: SignedPermit,
}

/// Registry API.
pub trait TokenRegistryApi {
    // ---- membership ------------------------------------------------------

    /// Admit an identity using off-line authorizations.
    fn admit_with_authorizations(&mut self, request: AdmissionRequest) -> RegistryResult<MemberId>;

    /// Leave the registry and recover the staked fee.
    fn exit(&mut self, caller: &Address, identity: &Address) -> RegistryResult<()>;

    /// Relay a signed member-data update.
    fn edit_member_data(&mut self, identity: &Address, attribute: SignedAttribute) -> RegistryResult<()>;

    /// Relay a signed hand-over of control.
    fn transfer_member_control(
        &mut self,
        identity: &Address,
        new_controller: &Address,
        authorization: SignedAuthorization,
    ) -> RegistryResult<()>;

    // ---- challenges ------------------------------------------------------

    /// Stake the challenge deposit against `challengee`.
    fn create_challenge(
        &mut self,
        caller: &Address,
        challenger: &MemberId,
        challengee: &MemberId,
        details: Vec<u8>,
    ) -> RegistryResult<ChallengeId>;

    /// Cast one vote for `voter`.
    fn submit_vote(
        &mut self,
        caller: &Address,
        challenge_id: ChallengeId,
        choice: VoteChoice,
        voter: &MemberId,
    ) -> RegistryResult<()>;

    /// Cast several votes; all or none are recorded.
    fn submit_votes_batch(
        &mut self,
        caller: &Address,
        challenge_id: ChallengeId,
        choices: &[VoteChoice],
        voters: &[MemberId],
    ) -> RegistryResult<()>;

    fn challenge_can_be_resolved(&self, challenge_id: ChallengeId) -> bool;

    /// Settle a challenge once voting has closed.
    fn resolve_challenge(&mut self, challenge_id: ChallengeId) -> RegistryResult<ChallengeOutcome>;

    // ---- queries ---------------------------------------------------------

    fn is_member(&self, identity: &Address) -> bool;

    /// Admission time, 0 for non-members.
    fn membership_start_time(&self, identity: &Address) -> Timestamp;

    fn member(&self, identity: &Address) -> Option<Member>;

    /// True while an unresolved challenge is linked to `identity`.
    fn member_challenge_exists(&self, identity: &Address) -> bool;

    /// Linked challenge id, 0 if none.
    fn challenge_id_of(&self, identity: &Address) -> ChallengeId;

    fn challenge(&self, challenge_id: ChallengeId) -> Option<Challenge>;

    /// `VoteChoice::Null` if `voter` has not voted.
    fn vote_of(&self, challenge_id: ChallengeId, voter: &Address) -> VoteChoice;

    fn reserve_balance(&self) -> U256;

    fn config(&self) -> &RegistryConfig;
}

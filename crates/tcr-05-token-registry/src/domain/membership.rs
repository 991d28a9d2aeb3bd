//! # Membership
//!
//! Admission, exit and the relayed identity updates. Each method mutates a
//! staged `RegistryState` and returns early on the first failing step; the
//! caller decides whether the staged copy is committed.

use crate::config::RegistryConfig;
use crate::domain::entities::{Member, MemberId, NO_CHALLENGE};
use crate::domain::state::RegistryState;
use crate::errors::{RegistryError, RegistryResult};
use crate::events::RegistryEvent;
use crate::ports::inbound::{AdmissionRequest, SignedAttribute};
use crate::ports::outbound::{IdentityDirectory, TransferableAsset};
use shared_types::{Address, Timestamp, U256};
use tcr_02_signature_verification::SignedAuthorization;

impl<D: IdentityDirectory, A: TransferableAsset> RegistryState<D, A> {
    pub(crate) fn admit(
        &mut self,
        config: &RegistryConfig,
        now: Timestamp,
        request: &AdmissionRequest,
    ) -> RegistryResult<MemberId> {
        let identity = request.identity;
        if self.members.contains_key(&identity) {
            return Err(RegistryError::AlreadyMember(identity));
        }

        let fee_payer = request.permit.holder;
        let permit = request.permit.message(config.registry_address);
        self.asset.permit(&permit, &request.permit.signature, now)?;
        self.bank.credit(
            &mut self.asset,
            &config.registry_address,
            &fee_payer,
            config.admission_fee,
        )?;

        let attribute = &request.attribute;
        self.directory.set_attribute(
            &identity,
            &attribute.name,
            &attribute.value,
            attribute.validity,
            &attribute.authorization,
            now,
        )?;
        self.directory
            .change_controller(&identity, &request.sponsor, &request.ownership, now)?;

        // A start time of 0 reads as "not a member".
        let start_time = now.max(1);
        self.members.insert(
            identity,
            Member {
                identity,
                controller: request.sponsor,
                membership_start_time: start_time,
                staked_fee: config.admission_fee,
                current_challenge_id: NO_CHALLENGE,
            },
        );
        self.emit(RegistryEvent::NewMember {
            identity,
            controller: request.sponsor,
            fee_payer,
            staked_fee: config.admission_fee,
            start_time,
        });
        Ok(identity)
    }

    /// Refunds the staked fee to the controller and drops the member.
    pub(crate) fn exit(&mut self, caller: &Address, identity: &Address) -> RegistryResult<U256> {
        let member = self
            .members
            .get(identity)
            .ok_or(RegistryError::NotMember(*identity))?;
        if member.controller != *caller {
            return Err(RegistryError::NotController {
                identity: *identity,
                caller: *caller,
            });
        }
        if member.has_challenge() {
            return Err(RegistryError::OngoingChallenge {
                identity: *identity,
                challenge_id: member.current_challenge_id,
            });
        }

        let (controller, refund) = (member.controller, member.staked_fee);
        self.bank.debit(&mut self.asset, refund, &controller)?;
        self.members.remove(identity);
        self.emit(RegistryEvent::MemberExited {
            identity: *identity,
            controller,
            refund,
        });
        Ok(refund)
    }

    pub(crate) fn edit_member_data(
        &mut self,
        now: Timestamp,
        identity: &Address,
        attribute: &SignedAttribute,
    ) -> RegistryResult<()> {
        if !self.members.contains_key(identity) {
            return Err(RegistryError::NotMember(*identity));
        }
        self.directory.set_attribute(
            identity,
            &attribute.name,
            &attribute.value,
            attribute.validity,
            &attribute.authorization,
            now,
        )?;
        self.emit(RegistryEvent::MemberDataEdited {
            identity: *identity,
            name: attribute.name,
            value: attribute.value.clone(),
        });
        Ok(())
    }

    pub(crate) fn transfer_member_control(
        &mut self,
        now: Timestamp,
        identity: &Address,
        new_controller: &Address,
        authorization: &SignedAuthorization,
    ) -> RegistryResult<()> {
        if !self.members.contains_key(identity) {
            return Err(RegistryError::NotMember(*identity));
        }
        self.directory
            .change_controller(identity, new_controller, authorization, now)?;

        let member = self
            .members
            .get_mut(identity)
            .ok_or(RegistryError::NotMember(*identity))?;
        let previous_controller = std::mem::replace(&mut member.controller, *new_controller);
        self.emit(RegistryEvent::MemberControlTransferred {
            identity: *identity,
            previous_controller,
            new_controller: *new_controller,
        });
        Ok(())
    }
}

//! # DID Registry
//!
//! Owner and attribute tables plus the event log. All writes are synchronous
//! and take the caller-supplied `now`, so the registry never reads a clock.

use crate::domain::entities::AttributeRecord;
use crate::domain::errors::{DirectoryError, DirectoryResult};
use crate::domain::events::DirectoryEvent;
use shared_types::{Address, Timestamp, U256};
use std::collections::HashMap;
use tcr_01_typed_data::{change_owner_digest, set_attribute_digest, AttributeName};
use tcr_02_signature_verification::{SignatureVerifier, SignedAuthorization};
use tracing::{debug, info};

/// In-process ERC-1056 identity registry.
#[derive(Debug, Clone)]
pub struct DidRegistry {
    address: Address,
    owners: HashMap<Address, Address>,
    changed: HashMap<Address, Timestamp>,
    attributes: HashMap<(Address, AttributeName), AttributeRecord>,
    verifier: SignatureVerifier,
    events: Vec<DirectoryEvent>,
}

impl DidRegistry {
    /// Create an empty registry deployed at `address`.
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            address,
            owners: HashMap::new(),
            changed: HashMap::new(),
            attributes: HashMap::new(),
            verifier: SignatureVerifier::secp256k1(),
            events: Vec::new(),
        }
    }

    /// Address the registry's signed writes are bound to.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Current owner; an identity owns itself until changed.
    #[must_use]
    pub fn identity_owner(&self, identity: &Address) -> Address {
        self.owners.get(identity).copied().unwrap_or(*identity)
    }

    /// Nonce the next signed write for `identity` must carry.
    #[must_use]
    pub fn nonce(&self, identity: &Address) -> U256 {
        self.verifier.current_nonce(identity)
    }

    /// Timestamp of the identity's last write, 0 if never written.
    #[must_use]
    pub fn changed(&self, identity: &Address) -> Timestamp {
        self.changed.get(identity).copied().unwrap_or_default()
    }

    /// Last value written under `name`, if any.
    #[must_use]
    pub fn attribute(&self, identity: &Address, name: &AttributeName) -> Option<&AttributeRecord> {
        self.attributes.get(&(*identity, *name))
    }

    /// Every event emitted so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[DirectoryEvent] {
        &self.events
    }

    /// Change ownership as the current owner.
    pub fn change_owner(
        &mut self,
        caller: &Address,
        identity: &Address,
        new_owner: &Address,
        now: Timestamp,
    ) -> DirectoryResult<()> {
        self.only_owner(caller, identity)?;
        self.apply_owner_change(identity, new_owner, now);
        Ok(())
    }

    /// Change ownership with an authorization signed by the current owner.
    pub fn change_owner_signed(
        &mut self,
        identity: &Address,
        new_owner: &Address,
        authorization: &SignedAuthorization,
        now: Timestamp,
    ) -> DirectoryResult<()> {
        let owner = self.identity_owner(identity);
        let digest = change_owner_digest(&self.address, authorization.nonce, identity, new_owner);
        self.verifier
            .verify_authorization(&digest, authorization, &owner, identity)?;
        self.apply_owner_change(identity, new_owner, now);
        Ok(())
    }

    /// Write an attribute as the current owner.
    pub fn set_attribute(
        &mut self,
        caller: &Address,
        identity: &Address,
        name: &AttributeName,
        value: &[u8],
        validity: U256,
        now: Timestamp,
    ) -> DirectoryResult<DirectoryEvent> {
        self.only_owner(caller, identity)?;
        Ok(self.apply_attribute(identity, name, value, validity, now))
    }

    /// Write an attribute with an authorization signed by the current owner.
    pub fn set_attribute_signed(
        &mut self,
        identity: &Address,
        name: &AttributeName,
        value: &[u8],
        validity: U256,
        authorization: &SignedAuthorization,
        now: Timestamp,
    ) -> DirectoryResult<DirectoryEvent> {
        let owner = self.identity_owner(identity);
        let digest = set_attribute_digest(
            &self.address,
            authorization.nonce,
            identity,
            name,
            value,
            validity,
        );
        self.verifier
            .verify_authorization(&digest, authorization, &owner, identity)?;
        Ok(self.apply_attribute(identity, name, value, validity, now))
    }

    fn only_owner(&self, caller: &Address, identity: &Address) -> DirectoryResult<()> {
        let owner = self.identity_owner(identity);
        if *caller != owner {
            return Err(DirectoryError::Unauthorized {
                identity: *identity,
                owner,
                caller: *caller,
            });
        }
        Ok(())
    }

    fn touch(&mut self, identity: &Address, now: Timestamp) -> Timestamp {
        self.changed.insert(*identity, now).unwrap_or_default()
    }

    fn apply_owner_change(&mut self, identity: &Address, new_owner: &Address, now: Timestamp) {
        self.owners.insert(*identity, *new_owner);
        let previous_change = self.touch(identity, now);
        info!(identity = %identity, owner = %new_owner, "Identity owner changed");
        self.events.push(DirectoryEvent::OwnerChanged {
            identity: *identity,
            owner: *new_owner,
            previous_change,
        });
    }

    fn apply_attribute(
        &mut self,
        identity: &Address,
        name: &AttributeName,
        value: &[u8],
        validity: U256,
        now: Timestamp,
    ) -> DirectoryEvent {
        let valid_to = U256::from(now).saturating_add(validity);
        self.attributes.insert(
            (*identity, *name),
            AttributeRecord {
                value: value.to_vec(),
                valid_to,
            },
        );
        let previous_change = self.touch(identity, now);
        debug!(identity = %identity, bytes = value.len(), "Attribute written");
        let event = DirectoryEvent::AttributeChanged {
            identity: *identity,
            name: *name,
            value: value.to_vec(),
            valid_to,
            previous_change,
        };
        self.events.push(event.clone());
        event
    }
}

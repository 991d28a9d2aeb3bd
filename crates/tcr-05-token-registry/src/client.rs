//! # Admission Signing
//!
//! Builds the three authorizations an admission needs, the way an applicant
//! and fee payer would produce them off-line: a signed attribute write and a
//! signed ownership transfer from the identity's controller, and a DAI permit
//! from the fee payer naming the registry as spender.

use crate::config::{RegistryConfig, TokenDomain};
use crate::ports::inbound::{AdmissionRequest, SignedAttribute, SignedPermit};
use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};
use tcr_01_typed_data::{AttributeName, DigestBuilder, PermitMessage};
use tcr_02_signature_verification::{SignatureError, Secp256k1Signer, SignedAuthorization};

/// Attribute an applicant publishes under its identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberData {
    pub name: AttributeName,
    pub value: Vec<u8>,
    /// Seconds the attribute stays valid.
    pub validity: U256,
}

/// Nonces an admission must be signed at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdmissionNonces {
    /// Directory nonce of the identity; the ownership transfer uses the next one.
    pub directory: U256,
    /// Permit nonce of the fee payer.
    pub permit: U256,
}

#[derive(Clone, Debug)]
pub struct AdmissionSigner {
    digests: DigestBuilder,
    registry: Address,
}

impl AdmissionSigner {
    #[must_use]
    pub fn new(digests: DigestBuilder, registry: Address) -> Self {
        Self { digests, registry }
    }

    #[must_use]
    pub fn for_registry(config: &RegistryConfig, directory: Address, token: &TokenDomain) -> Self {
        Self::new(
            DigestBuilder::new(directory, token.to_eip712()),
            config.registry_address,
        )
    }

    #[must_use]
    pub fn digests(&self) -> &DigestBuilder {
        &self.digests
    }

    pub fn sign_attribute(
        &self,
        controller: &Secp256k1Signer,
        identity: &Address,
        data: &MemberData,
        nonce: U256,
    ) -> Result<SignedAttribute, SignatureError> {
        let digest =
            self.digests
                .attribute_set(identity, &data.name, &data.value, data.validity, nonce);
        Ok(SignedAttribute {
            name: data.name,
            value: data.value.clone(),
            validity: data.validity,
            authorization: SignedAuthorization::new(nonce, controller.sign_digest(&digest)?),
        })
    }

    pub fn sign_ownership_transfer(
        &self,
        controller: &Secp256k1Signer,
        identity: &Address,
        new_controller: &Address,
        nonce: U256,
    ) -> Result<SignedAuthorization, SignatureError> {
        let digest = self
            .digests
            .ownership_transfer(identity, new_controller, nonce);
        Ok(SignedAuthorization::new(nonce, controller.sign_digest(&digest)?))
    }

    /// Unlimited allowance for the registry, with no expiry.
    pub fn sign_permit(
        &self,
        holder: &Secp256k1Signer,
        nonce: U256,
    ) -> Result<SignedPermit, SignatureError> {
        let message = PermitMessage {
            holder: holder.address(),
            spender: self.registry,
            nonce,
            expiry: U256::zero(),
            allowed: true,
        };
        let signature = holder.sign_digest(&self.digests.permit(&message))?;
        Ok(SignedPermit {
            holder: message.holder,
            nonce,
            expiry: message.expiry,
            allowed: message.allowed,
            signature,
        })
    }

    /// Full admission for a self-owned identity handing control to `sponsor`.
    pub fn sign_admission(
        &self,
        identity: &Secp256k1Signer,
        fee_payer: &Secp256k1Signer,
        sponsor: Address,
        data: &MemberData,
        nonces: AdmissionNonces,
    ) -> Result<AdmissionRequest, SignatureError> {
        let id = identity.address();
        let attribute = self.sign_attribute(identity, &id, data, nonces.directory)?;
        let ownership =
            self.sign_ownership_transfer(identity, &id, &sponsor, nonces.directory + U256::one())?;
        let permit = self.sign_permit(fee_payer, nonces.permit)?;
        Ok(AdmissionRequest {
            identity: id,
            sponsor,
            attribute,
            ownership,
            permit,
        })
    }
}

//! # Digest Builder
//!
//! Façade binding the two contract addresses every authorization is scoped
//! to, so callers only supply the per-authorization fields.

use crate::did::{change_owner_digest, set_attribute_digest, AttributeName};
use crate::permit::{domain_separator, permit_digest, Eip712Domain, PermitMessage};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, U256};

/// The three kinds of off-line authorization the registry settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthorizationKind {
    /// `changeOwnerSigned` on the identity directory.
    OwnershipTransfer,
    /// `setAttributeSigned` on the identity directory.
    AttributeSet,
    /// `permit` on the transferable asset.
    Permit,
}

impl AuthorizationKind {
    /// The two-byte EIP-191 prefix that opens this kind's pre-image.
    #[must_use]
    pub const fn prefix(self) -> [u8; 2] {
        match self {
            Self::OwnershipTransfer | Self::AttributeSet => [0x19, 0x00],
            Self::Permit => [0x19, 0x01],
        }
    }
}

/// Computes digests for a fixed directory and asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DigestBuilder {
    directory: Address,
    asset_domain: Eip712Domain,
    asset_separator: Hash,
}

impl DigestBuilder {
    /// Create a builder; the asset's domain separator is computed once here.
    #[must_use]
    pub fn new(directory: Address, asset_domain: Eip712Domain) -> Self {
        let asset_separator = domain_separator(&asset_domain);
        Self {
            directory,
            asset_domain,
            asset_separator,
        }
    }

    /// Address of the identity directory.
    #[must_use]
    pub fn directory(&self) -> Address {
        self.directory
    }

    /// The asset's signing domain.
    #[must_use]
    pub fn asset_domain(&self) -> &Eip712Domain {
        &self.asset_domain
    }

    /// Cached asset domain separator.
    #[must_use]
    pub fn asset_separator(&self) -> Hash {
        self.asset_separator
    }

    /// Digest for handing control of `identity` to `new_owner`.
    #[must_use]
    pub fn ownership_transfer(&self, identity: &Address, new_owner: &Address, nonce: U256) -> Hash {
        change_owner_digest(&self.directory, nonce, identity, new_owner)
    }

    /// Digest for writing an attribute on `identity`.
    #[must_use]
    pub fn attribute_set(
        &self,
        identity: &Address,
        name: &AttributeName,
        value: &[u8],
        validity: U256,
        nonce: U256,
    ) -> Hash {
        set_attribute_digest(&self.directory, nonce, identity, name, value, validity)
    }

    /// Digest for a permit on the asset.
    #[must_use]
    pub fn permit(&self, message: &PermitMessage) -> Hash {
        permit_digest(&self.asset_separator, message)
    }
}

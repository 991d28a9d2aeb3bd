//! # Outbound Ports (Driven Ports / SPI)
//!
//! Collaborators the registry drives. The directory and asset are part of the
//! world state a transaction stages, so both must be `Clone`; a clone is an
//! independent copy, not a shared handle.

use shared_types::{Address, EcdsaSignature, Timestamp, U256};
use tcr_01_typed_data::{AttributeName, PermitMessage};
use tcr_02_signature_verification::{AuthorizationError, SignedAuthorization};
use thiserror::Error;

use crate::errors::RegistryError;

/// Error from identity-directory writes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// The signed write failed verification.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    /// A direct write was attempted by a non-owner.
    #[error("{caller:?} does not own {identity:?}")]
    Unauthorized { identity: Address, caller: Address },
}

impl From<DirectoryError> for RegistryError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Authorization(auth) => auth.into(),
            DirectoryError::Unauthorized { identity, caller } => {
                Self::NotController { identity, caller }
            }
        }
    }
}

/// Error from the transferable asset.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssetError {
    /// The permit signature or nonce was rejected.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    #[error("permit expired at {expiry}, now {now}")]
    PermitExpired { expiry: U256, now: Timestamp },

    /// Any other refusal (balance, allowance, malformed permit).
    #[error("{0}")]
    Rejected(String),
}

impl From<AssetError> for RegistryError {
    fn from(err: AssetError) -> Self {
        match err {
            AssetError::Authorization(auth) => auth.into(),
            AssetError::PermitExpired { expiry, now } => Self::PermitExpired { expiry, now },
            AssetError::Rejected(reason) => Self::TransferFailed { reason },
        }
    }
}

/// ERC-1056-style identity directory.
pub trait IdentityDirectory: Clone + Send + Sync {
    /// Address signed writes are bound to.
    fn address(&self) -> Address;

    /// Party currently entitled to sign for `identity`.
    fn current_controller(&self, identity: &Address) -> Address;

    /// Nonce the next signed write for `identity` must carry.
    fn current_nonce(&self, identity: &Address) -> U256;

    /// Hand control of `identity` to `new_controller`, authorized by the
    /// current controller.
    fn change_controller(
        &mut self,
        identity: &Address,
        new_controller: &Address,
        authorization: &SignedAuthorization,
        now: Timestamp,
    ) -> Result<(), DirectoryError>;

    /// Write an attribute, authorized by the current controller.
    fn set_attribute(
        &mut self,
        identity: &Address,
        name: &AttributeName,
        value: &[u8],
        validity: U256,
        authorization: &SignedAuthorization,
        now: Timestamp,
    ) -> Result<(), DirectoryError>;

    /// Current value of an attribute.
    fn attribute(&self, identity: &Address, name: &AttributeName) -> Option<Vec<u8>>;
}

/// DAI-style asset with `permit`.
pub trait TransferableAsset: Clone + Send + Sync {
    /// Contract address (the permit domain's verifying contract).
    fn address(&self) -> Address;

    fn balance_of(&self, holder: &Address) -> U256;

    fn allowance(&self, owner: &Address, spender: &Address) -> U256;

    /// Permit nonce of `holder`.
    fn nonces(&self, holder: &Address) -> U256;

    /// Apply a signed permit.
    fn permit(
        &mut self,
        permit: &PermitMessage,
        signature: &EcdsaSignature,
        now: Timestamp,
    ) -> Result<(), AssetError>;

    /// Move `amount` from `from` to `to` as `caller`.
    fn transfer_from(
        &mut self,
        caller: &Address,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<(), AssetError>;
}

/// Source of the operation timestamp; read once per operation.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

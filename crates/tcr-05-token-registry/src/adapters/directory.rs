//! `IdentityDirectory` over the in-process `DidRegistry`.

use crate::ports::outbound::{DirectoryError, IdentityDirectory};
use shared_types::{Address, Timestamp, U256};
use tcr_01_typed_data::AttributeName;
use tcr_02_signature_verification::SignedAuthorization;
use tcr_03_identity_directory::{DidRegistry, DirectoryError as DidError};

/// Owns a `DidRegistry`; cloning clones the registry.
#[derive(Debug, Clone)]
pub struct DidDirectoryAdapter {
    inner: DidRegistry,
}

impl DidDirectoryAdapter {
    #[must_use]
    pub fn new(inner: DidRegistry) -> Self {
        Self { inner }
    }

    /// The wrapped registry.
    #[must_use]
    pub fn inner(&self) -> &DidRegistry {
        &self.inner
    }

    /// The wrapped registry, for writes outside the registry's control.
    pub fn inner_mut(&mut self) -> &mut DidRegistry {
        &mut self.inner
    }
}

impl From<DidError> for DirectoryError {
    fn from(err: DidError) -> Self {
        match err {
            DidError::Authorization(auth) => Self::Authorization(auth),
            DidError::Unauthorized {
                identity, caller, ..
            } => Self::Unauthorized { identity, caller },
        }
    }
}

impl IdentityDirectory for DidDirectoryAdapter {
    fn address(&self) -> Address {
        self.inner.address()
    }

    fn current_controller(&self, identity: &Address) -> Address {
        self.inner.identity_owner(identity)
    }

    fn current_nonce(&self, identity: &Address) -> U256 {
        self.inner.nonce(identity)
    }

    fn change_controller(
        &mut self,
        identity: &Address,
        new_controller: &Address,
        authorization: &SignedAuthorization,
        now: Timestamp,
    ) -> Result<(), DirectoryError> {
        self.inner
            .change_owner_signed(identity, new_controller, authorization, now)
            .map_err(Into::into)
    }

    fn set_attribute(
        &mut self,
        identity: &Address,
        name: &AttributeName,
        value: &[u8],
        validity: U256,
        authorization: &SignedAuthorization,
        now: Timestamp,
    ) -> Result<(), DirectoryError> {
        self.inner
            .set_attribute_signed(identity, name, value, validity, authorization, now)
            .map(|_| ())
            .map_err(Into::into)
    }

    fn attribute(&self, identity: &Address, name: &AttributeName) -> Option<Vec<u8>> {
        self.inner
            .attribute(identity, name)
            .map(|record| record.value.clone())
    }
}

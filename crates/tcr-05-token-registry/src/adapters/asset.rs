//! `TransferableAsset` over the in-process `StableToken`.

use crate::ports::outbound::{AssetError, TransferableAsset};
use shared_types::{Address, EcdsaSignature, Timestamp, U256};
use tcr_01_typed_data::PermitMessage;
use tcr_04_stable_token::{StableToken, TokenError};

/// Owns a `StableToken`; cloning clones the token.
#[derive(Debug, Clone)]
pub struct StableTokenAdapter {
    inner: StableToken,
}

impl StableTokenAdapter {
    #[must_use]
    pub fn new(inner: StableToken) -> Self {
        Self { inner }
    }

    /// The wrapped token.
    #[must_use]
    pub fn inner(&self) -> &StableToken {
        &self.inner
    }

    /// The wrapped token, for minting and transfers outside the registry.
    pub fn inner_mut(&mut self) -> &mut StableToken {
        &mut self.inner
    }
}

impl From<TokenError> for AssetError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Authorization(auth) => Self::Authorization(auth),
            TokenError::PermitExpired { expiry, now } => Self::PermitExpired { expiry, now },
            other => Self::Rejected(other.to_string()),
        }
    }
}

impl TransferableAsset for StableTokenAdapter {
    fn address(&self) -> Address {
        self.inner.address()
    }

    fn balance_of(&self, holder: &Address) -> U256 {
        self.inner.balance_of(holder)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.inner.allowance(owner, spender)
    }

    fn nonces(&self, holder: &Address) -> U256 {
        self.inner.nonces(holder)
    }

    fn permit(
        &mut self,
        permit: &PermitMessage,
        signature: &EcdsaSignature,
        now: Timestamp,
    ) -> Result<(), AssetError> {
        self.inner.permit(permit, signature, now).map_err(Into::into)
    }

    fn transfer_from(
        &mut self,
        caller: &Address,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<(), AssetError> {
        self.inner
            .transfer_from(caller, from, to, amount)
            .map_err(Into::into)
    }
}

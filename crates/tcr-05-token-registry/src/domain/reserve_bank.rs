//! # Reserve Bank
//!
//! Ledger of funds the registry holds in escrow at a fixed address. It moves
//! only with the asset: a credit is recorded after the asset pulls funds in, a
//! debit after the asset pushes them out. A failed asset transfer leaves the
//! ledger as it was.

use crate::errors::RegistryError;
use crate::ports::outbound::{AssetError, TransferableAsset};
use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};
use thiserror::Error;
use tracing::debug;

/// Ledger errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BankError {
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// A payout exceeds what the ledger holds.
    #[error("insufficient reserve: holding {balance}, requested {requested}")]
    InsufficientReserve { balance: U256, requested: U256 },

    #[error("reserve overflow")]
    Overflow,
}

impl From<BankError> for RegistryError {
    fn from(err: BankError) -> Self {
        Self::TransferFailed {
            reason: err.to_string(),
        }
    }
}

/// Escrow ledger at `address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveBank {
    address: Address,
    balance: U256,
}

impl ReserveBank {
    /// Empty ledger at `address`.
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            address,
            balance: U256::zero(),
        }
    }

    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Funds the ledger accounts for.
    #[must_use]
    pub fn balance(&self) -> U256 {
        self.balance
    }

    /// Pull `amount` from `from` into the bank, with `spender` as the asset caller.
    pub fn credit<A: TransferableAsset>(
        &mut self,
        asset: &mut A,
        spender: &Address,
        from: &Address,
        amount: U256,
    ) -> Result<(), BankError> {
        let updated = self.balance.checked_add(amount).ok_or(BankError::Overflow)?;
        asset.transfer_from(spender, from, &self.address, amount)?;
        self.balance = updated;
        debug!(from = %from, %amount, reserve = %self.balance, "Reserve credited");
        Ok(())
    }

    /// Push `amount` out of the bank to `recipient`.
    pub fn debit<A: TransferableAsset>(
        &mut self,
        asset: &mut A,
        amount: U256,
        recipient: &Address,
    ) -> Result<(), BankError> {
        let updated = self
            .balance
            .checked_sub(amount)
            .ok_or(BankError::InsufficientReserve {
                balance: self.balance,
                requested: amount,
            })?;
        asset.transfer_from(&self.address, &self.address, recipient, amount)?;
        self.balance = updated;
        debug!(to = %recipient, %amount, reserve = %self.balance, "Reserve debited");
        Ok(())
    }
}

//! # Stable Token
//!
//! Balance and allowance tables with DAI transfer semantics:
//! - `transfer_from` skips the allowance when the caller moves its own funds
//! - an allowance of `U256::MAX` is never decremented
//! - `permit` sets the allowance to `U256::MAX` or zero, never a partial amount

use crate::domain::errors::{TokenError, TokenResult};
use crate::domain::events::TokenEvent;
use shared_types::{Address, EcdsaSignature, Hash, Timestamp, U256};
use std::collections::HashMap;
use tcr_01_typed_data::{permit_digest, Eip712Domain, PermitMessage};
use tcr_02_signature_verification::SignatureVerifier;
use tracing::{debug, info};

/// In-process DAI-style token.
#[derive(Debug, Clone)]
pub struct StableToken {
    domain: Eip712Domain,
    separator: Hash,
    total_supply: U256,
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
    verifier: SignatureVerifier,
    events: Vec<TokenEvent>,
}

impl StableToken {
    /// Deploy a token under `domain`; its address is the domain's verifying contract.
    #[must_use]
    pub fn new(domain: Eip712Domain) -> Self {
        let separator = domain.separator();
        Self {
            domain,
            separator,
            total_supply: U256::zero(),
            balances: HashMap::new(),
            allowances: HashMap::new(),
            verifier: SignatureVerifier::secp256k1(),
            events: Vec::new(),
        }
    }

    /// Contract address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.domain.verifying_contract
    }

    /// EIP-712 signing domain.
    #[must_use]
    pub fn domain(&self) -> &Eip712Domain {
        &self.domain
    }

    /// EIP-712 domain separator.
    #[must_use]
    pub fn domain_separator(&self) -> Hash {
        self.separator
    }

    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    #[must_use]
    pub fn balance_of(&self, holder: &Address) -> U256 {
        self.balances.get(holder).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// Permit nonce of `holder`.
    #[must_use]
    pub fn nonces(&self, holder: &Address) -> U256 {
        self.verifier.current_nonce(holder)
    }

    /// Every event emitted so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[TokenEvent] {
        &self.events
    }

    /// Create `amount` new tokens for `to`.
    pub fn mint(&mut self, to: &Address, amount: U256) -> TokenResult<()> {
        self.total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::SupplyOverflow)?;
        let balance = self.balances.entry(*to).or_default();
        *balance = balance.saturating_add(amount);
        info!(to = %to, %amount, "Minted");
        self.events.push(TokenEvent::Transfer {
            from: Address::ZERO,
            to: *to,
            amount,
        });
        Ok(())
    }

    /// Move the caller's own tokens.
    pub fn transfer(&mut self, caller: &Address, to: &Address, amount: U256) -> TokenResult<()> {
        self.move_balance(caller, to, amount)
    }

    /// Set the caller's allowance for `spender`.
    pub fn approve(&mut self, caller: &Address, spender: &Address, amount: U256) {
        self.set_allowance(caller, spender, amount);
    }

    /// Move `from`'s tokens as `caller`, spending allowance unless `caller == from`.
    pub fn transfer_from(
        &mut self,
        caller: &Address,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> TokenResult<()> {
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(TokenError::InsufficientBalance {
                holder: *from,
                balance,
                needed: amount,
            });
        }

        if caller != from {
            let allowance = self.allowance(from, caller);
            if allowance != U256::MAX {
                if allowance < amount {
                    return Err(TokenError::InsufficientAllowance {
                        owner: *from,
                        spender: *caller,
                        allowance,
                        needed: amount,
                    });
                }
                self.allowances.insert((*from, *caller), allowance - amount);
            }
        }

        self.move_balance(from, to, amount)
    }

    /// Grant (`allowed`) or revoke an unlimited allowance with the holder's
    /// signature over the permit digest.
    pub fn permit(
        &mut self,
        permit: &PermitMessage,
        signature: &EcdsaSignature,
        now: Timestamp,
    ) -> TokenResult<()> {
        if permit.holder.is_zero() {
            return Err(TokenError::ZeroHolder);
        }
        if !permit.expiry.is_zero() && U256::from(now) > permit.expiry {
            return Err(TokenError::PermitExpired {
                expiry: permit.expiry,
                now,
            });
        }

        let digest = permit_digest(&self.separator, permit);
        self.verifier.verify(
            &digest,
            signature,
            &permit.holder,
            &permit.holder,
            permit.nonce,
        )?;

        let amount = if permit.allowed {
            U256::MAX
        } else {
            U256::zero()
        };
        self.set_allowance(&permit.holder, &permit.spender, amount);
        Ok(())
    }

    fn set_allowance(&mut self, owner: &Address, spender: &Address, amount: U256) {
        self.allowances.insert((*owner, *spender), amount);
        debug!(owner = %owner, spender = %spender, %amount, "Approval");
        self.events.push(TokenEvent::Approval {
            owner: *owner,
            spender: *spender,
            amount,
        });
    }

    fn move_balance(&mut self, from: &Address, to: &Address, amount: U256) -> TokenResult<()> {
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(TokenError::InsufficientBalance {
                holder: *from,
                balance,
                needed: amount,
            });
        }
        self.balances.insert(*from, balance - amount);
        let credited = self.balances.entry(*to).or_default();
        // Bounded by total supply.
        *credited = credited.saturating_add(amount);
        debug!(from = %from, to = %to, %amount, "Transfer");
        self.events.push(TokenEvent::Transfer {
            from: *from,
            to: *to,
            amount,
        });
        Ok(())
    }
}

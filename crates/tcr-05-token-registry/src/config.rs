//! # Configuration
//!
//! Registry constants are fixed when the service is built. They load from
//! defaults, environment variables or a JSON document.
//!
//! ## Environment Variables
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `TCR_REGISTRY_ADDRESS` | `registry_address` | derived |
//! | `TCR_RESERVE_BANK_ADDRESS` | `reserve_bank_address` | derived |
//! | `TCR_ADMISSION_FEE` | `admission_fee` | 10 tokens (10^19 base units) |
//! | `TCR_CHALLENGE_DEPOSIT` | `challenge_deposit` | 10 tokens |
//! | `TCR_VOTE_PERIOD_SECS` | `vote_period_secs` | 172800 (2 days) |
//! | `TCR_TOKEN_NAME` | `TokenDomain::name` | `Dai Stablecoin` |
//! | `TCR_TOKEN_VERSION` | `TokenDomain::version` | `1` |
//! | `TCR_CHAIN_ID` | `TokenDomain::chain_id` | 1 |
//! | `TCR_TOKEN_ADDRESS` | `TokenDomain::address` | derived |
//!
//! Amounts accept decimal or `0x`-prefixed hex.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use shared_types::{keccak256, Address, U256};
use std::env;
use tcr_01_typed_data::Eip712Domain;

/// Two days.
pub const DEFAULT_VOTE_PERIOD_SECS: u64 = 2 * 24 * 60 * 60;

/// Ten whole tokens at 18 decimals.
#[must_use]
pub fn default_stake() -> U256 {
    U256::from(10u64) * U256::exp10(18)
}

fn derived_address(label: &str) -> Address {
    Address::from_word(&keccak256(label.as_bytes()))
}

fn parse_amount(key: &'static str, raw: &str) -> Result<U256, ConfigError> {
    let parsed = match raw.strip_prefix("0x") {
        Some(hex) => U256::from_str_radix(hex, 16).ok(),
        None => U256::from_dec_str(raw).ok(),
    };
    parsed.ok_or_else(|| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

fn parse_address(key: &'static str, raw: &str) -> Result<Address, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

fn parse_u64(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

// =============================================================================
// REGISTRY CONFIG
// =============================================================================

/// Registry constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Address the registry acts as (permit spender, asset caller).
    pub registry_address: Address,
    /// Escrow account holding fees and deposits.
    pub reserve_bank_address: Address,
    /// Fee staked at admission, in asset base units.
    pub admission_fee: U256,
    /// Deposit staked to open a challenge.
    pub challenge_deposit: U256,
    /// Length of the voting window.
    pub vote_period_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            registry_address: derived_address("tcr.registry"),
            reserve_bank_address: derived_address("tcr.reserve-bank"),
            admission_fee: default_stake(),
            challenge_deposit: default_stake(),
            vote_period_secs: DEFAULT_VOTE_PERIOD_SECS,
        }
    }
}

impl RegistryConfig {
    /// Load from `TCR_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from any key lookup, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = lookup("TCR_REGISTRY_ADDRESS") {
            config.registry_address = parse_address("TCR_REGISTRY_ADDRESS", &raw)?;
        }
        if let Some(raw) = lookup("TCR_RESERVE_BANK_ADDRESS") {
            config.reserve_bank_address = parse_address("TCR_RESERVE_BANK_ADDRESS", &raw)?;
        }
        if let Some(raw) = lookup("TCR_ADMISSION_FEE") {
            config.admission_fee = parse_amount("TCR_ADMISSION_FEE", &raw)?;
        }
        if let Some(raw) = lookup("TCR_CHALLENGE_DEPOSIT") {
            config.challenge_deposit = parse_amount("TCR_CHALLENGE_DEPOSIT", &raw)?;
        }
        if let Some(raw) = lookup("TCR_VOTE_PERIOD_SECS") {
            config.vote_period_secs = parse_u64("TCR_VOTE_PERIOD_SECS", &raw)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document. Missing fields take their defaults; amounts
    /// are `0x`-prefixed hex strings.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the registry cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.registry_address.is_zero() {
            return Err(ConfigError::Invalid("registry address is zero".into()));
        }
        if self.reserve_bank_address.is_zero() {
            return Err(ConfigError::Invalid("reserve bank address is zero".into()));
        }
        if self.registry_address == self.reserve_bank_address {
            return Err(ConfigError::Invalid(
                "registry and reserve bank share an address".into(),
            ));
        }
        if self.vote_period_secs == 0 {
            return Err(ConfigError::Invalid("vote period is zero".into()));
        }
        Ok(())
    }
}

// =============================================================================
// TOKEN DOMAIN
// =============================================================================

/// Signing domain of the fee asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenDomain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub address: Address,
}

impl Default for TokenDomain {
    fn default() -> Self {
        Self {
            name: "Dai Stablecoin".to_string(),
            version: "1".to_string(),
            chain_id: 1,
            address: derived_address("tcr.stable-token"),
        }
    }
}

impl TokenDomain {
    /// Load from `TCR_TOKEN_*` / `TCR_CHAIN_ID`, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut domain = Self::default();
        if let Some(name) = lookup("TCR_TOKEN_NAME") {
            domain.name = name;
        }
        if let Some(version) = lookup("TCR_TOKEN_VERSION") {
            domain.version = version;
        }
        if let Some(raw) = lookup("TCR_CHAIN_ID") {
            domain.chain_id = parse_u64("TCR_CHAIN_ID", &raw)?;
        }
        if let Some(raw) = lookup("TCR_TOKEN_ADDRESS") {
            domain.address = parse_address("TCR_TOKEN_ADDRESS", &raw)?;
        }
        Ok(domain)
    }

    /// The EIP-712 domain permits are signed under.
    #[must_use]
    pub fn to_eip712(&self) -> Eip712Domain {
        Eip712Domain {
            name: self.name.clone(),
            version: self.version.clone(),
            chain_id: U256::from(self.chain_id),
            verifying_contract: self.address,
        }
    }
}

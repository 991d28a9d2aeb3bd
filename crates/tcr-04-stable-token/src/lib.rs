//! # Stable Token (TCR-04)
//!
//! An in-process DAI-style token: balances, allowances, and `permit`, which
//! lets a holder grant or revoke an unlimited allowance with an off-line
//! EIP-712 signature. Permit nonces live in the token and are independent of
//! any other nonce space.

pub mod domain;
pub mod service;

pub use domain::errors::{TokenError, TokenResult};
pub use domain::events::TokenEvent;
pub use service::StableToken;

//! # Domain Layer
//!
//! Registry entities, the reserve ledger, conservation checks, the
//! transaction guard, and the membership and challenge state machines
//! operating on a staged `RegistryState`.

pub mod challenges;
pub mod entities;
pub mod invariants;
pub mod membership;
pub mod reserve_bank;
pub mod state;
pub mod transaction;

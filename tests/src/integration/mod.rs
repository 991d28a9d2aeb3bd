//! Integration flows across the registry, directory and token.

pub mod admission;
pub mod challenges;
pub mod conservation;
pub mod metrics;

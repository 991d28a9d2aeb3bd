//! # Ports Layer
//!
//! - **Inbound (Driving)**: `TokenRegistryApi`, what hosts call
//! - **Outbound (Driven)**: the identity directory, the asset and the clock

pub mod inbound;
pub mod outbound;

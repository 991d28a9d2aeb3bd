//! # Adapters Module
//!
//! Implementations of the outbound ports.

mod secp256k1;

pub use secp256k1::Secp256k1Recovery;

//! # Adapters Module
//!
//! Outbound port implementations over the in-process directory and token,
//! plus wall-clock and manual clocks.

pub mod asset;
pub mod clock;
pub mod directory;

pub use asset::StableTokenAdapter;
pub use clock::{ManualClock, SystemClock};
pub use directory::DidDirectoryAdapter;

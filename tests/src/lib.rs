//! # Token Registry Test Suite
//!
//! Cross-crate flows driving the registry through its public API with real
//! secp256k1 signatures, the in-process DID directory and the stable token.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs        # deterministic keys and a funded registry world
//! └── integration/
//!     ├── admission.rs   # signed admission, replay, re-application
//!     ├── challenges.rs  # challenge lifecycle and voting
//!     └── conservation.rs# reserve conservation under random operations
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p tcr-tests
//! cargo test -p tcr-tests integration::challenges::
//!
//! # Benchmarks
//! cargo bench -p tcr-tests
//! ```

pub mod fixtures;
pub mod integration;

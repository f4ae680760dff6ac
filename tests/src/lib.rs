//! # CrossTalk Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion groups per subsystem
//! │   ├── xt_01_quorum.rs
//! │   └── xt_02_gateway.rs
//! │
//! ├── exploits/         # Attack simulations
//! │   ├── replay.rs     # Nonce and cross-chain replay
//! │   ├── signatures.rs # Malleability, duplication, forged quorums
//! │   └── valset.rs     # Validator-set capture
//! │
//! └── integration/      # Two-chain choreography over the event bus
//!     ├── relayer.rs
//!     └── round_trip.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p xt-tests
//!
//! # By category
//! cargo test -p xt-tests integration::
//! cargo test -p xt-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p xt-tests
//! ```

#![allow(dead_code)]

pub mod benchmarks;
pub mod exploits;
pub mod integration;

//! # Shared Types Crate
//!
//! Entities exchanged between gateways, relayers and destination handlers.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every type that crosses a chain boundary is
//!   defined here, so the gateway, the relayer tooling and the tests agree on
//!   one shape.
//! - **Raw Addresses**: cross-chain addresses are opaque byte strings. Only the
//!   validator roster uses 20-byte Ethereum addresses.
//! - **No Encoding Logic**: canonical ABI encoding lives in the gateway; these
//!   types only carry data.

pub mod entities;
pub mod errors;
pub mod events;

pub use entities::*;
pub use errors::*;
pub use events::*;

//! # Domain Layer
//!
//! Gateway state pieces and their rules. No I/O.

pub mod config;
pub mod entities;
pub mod errors;
pub mod fees;
pub mod invariants;
pub mod nonces;
pub mod state;

pub use config::GatewayConfig;
pub use entities::{AckOutcome, OutboundRequest, TxContext};
pub use errors::GatewayError;
pub use fees::{FeeEntry, FeeTable};
pub use invariants::{invariant_batch_shape, invariant_not_expired, invariant_owner};
pub use nonces::NonceLedger;
pub use state::{ContractStorage, Overlay, StateLayer, WorldState};

//! # Adapters
//!
//! - `contract_host`: in-process destination applications

pub mod contract_host;

pub use contract_host::{CallResult, ContractHost};

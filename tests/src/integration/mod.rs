//! # Integration Flows
//!
//! Two gateways, two event buses and an in-process relayer.

pub mod relayer;
pub mod round_trip;

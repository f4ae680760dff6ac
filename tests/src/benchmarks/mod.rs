//! # CrossTalk Benchmarks
//!
//! Criterion groups per subsystem, wired up in `benches/gateway_benchmarks.rs`.

pub mod xt_01_quorum;
pub mod xt_02_gateway;

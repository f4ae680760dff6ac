//! Domain layer: pure cryptographic and roster logic, no I/O.

pub mod checkpoint;
pub mod ecdsa;
pub mod entities;
pub mod errors;
pub mod quorum;
pub mod registry;

//! # CrossTalk Gateway Subsystem (XT-02)
//!
//! The per-chain endpoint of the CrossTalk protocol.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): fees, nonces, handler storage, config, errors
//! - **Algorithms** (`algorithms/`): ABI encodings and the pure steps of each operation
//! - **Ports Layer** (`ports/`): `GatewayApi` (driven) and `CrossTalkHandler` (driving)
//! - **Adapters** (`adapters/`): the in-process contract host
//! - **Aggregate** (`gateway.rs`): one chain's gateway state
//! - **Service Layer** (`service.rs`): locking, event publication, metrics
//!
//! ## Operations
//!
//! | Operation | Caller | Effect |
//! |-----------|--------|--------|
//! | `request_to_dest` | application | charge fee, emit `RequestToDest` |
//! | `request_from_source` | relayer | verify quorum, execute batch, emit `CrossTalkAck` |
//! | `cross_talk_ack` | relayer | verify quorum, record ack, notify the sender |
//! | `update_valset` | relayer | verify quorum of the active set, install successor |
//!
//! ## Security
//!
//! - Every inbound message binds this chain's identity, so a batch signed for
//!   one chain cannot execute on another.
//! - `(source chain, crossTalkNonce)` executes at most once.
//! - Signatures must come from the active validator set, in ascending
//!   address order, carrying at least two thirds of its power.
//! - A request whose `expTimestamp` has passed is rejected before any
//!   signature work.

#![warn(missing_docs)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod gateway;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_helpers;

// Re-export main types
pub use adapters::{CallResult, ContractHost};
pub use algorithms::{
    cross_talk_ack_hash, decode_atomic_failure, decode_exec_result, decode_revert_message,
    encode_cross_talk_ack, encode_request_from_source, request_from_source_hash, AtomicFailure,
    BatchOutcome, CustomError, ExecuteCallsRevert,
};
pub use domain::{
    AckOutcome, ContractStorage, FeeEntry, FeeTable, GatewayConfig, GatewayError, NonceLedger,
    OutboundRequest, TxContext, WorldState,
};
pub use gateway::Gateway;
pub use ports::{CrossTalkHandler, GatewayApi, HandlerRevert, RequestContext};
pub use service::GatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

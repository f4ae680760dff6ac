//! # Algorithms
//!
//! Encodings and the pure steps of each gateway operation.

pub mod abi;
pub mod ack;
pub mod execution;
pub mod inbound;
pub mod outbound;

pub use abi::{
    cross_talk_ack_hash, decode_atomic_failure, decode_exec_result, decode_revert_message,
    encode_cross_talk_ack, encode_exec_result, encode_request_from_source,
    request_from_source_hash, AtomicFailure, CustomError, ExecuteCallsRevert,
    CROSS_TALK_ACK_METHOD, REQUEST_FROM_SOURCE_METHOD,
};
pub use ack::AckLedger;
pub use execution::{execute_batch, BatchOutcome};
pub use inbound::AckMarkers;
pub use outbound::caller_identity;

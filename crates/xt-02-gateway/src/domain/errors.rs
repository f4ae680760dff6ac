//! # Domain Errors
//!
//! Error types for the CrossTalk Gateway.
//!
//! Every variant aborts the operation with no state change. Failures of
//! individual destination calls are not errors; they are captured as data in
//! the acknowledgment.

use shared_types::{AckType, Address, ChainIdentity, TypeError};
use thiserror::Error;
use xt_01_signature_verification::VerificationError;

/// Gateway error types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Signature, quorum or validator-set check failed.
    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// No fee configured for the route.
    #[error("Fee not set for ack type {ack_type:?} to chain {dest_chain_id}")]
    FeeNotSet {
        /// Requested acknowledgment mode
        ack_type: AckType,
        /// Destination chain id
        dest_chain_id: String,
    },

    /// Attached value below the configured fee.
    #[error("Insufficient fee: required {required}, provided {provided}")]
    InsufficientFee {
        /// Configured fee
        required: u128,
        /// Value attached to the request
        provided: u128,
    },

    /// Inbound request past its deadline.
    #[error("Request expired at {exp_timestamp} (block time {block_timestamp})")]
    RequestExpired {
        /// Deadline carried by the payload
        exp_timestamp: u64,
        /// Current block time
        block_timestamp: u64,
    },

    /// Inbound request already executed.
    #[error("Request {cross_talk_nonce} from {source_chain} already executed")]
    ReplayedRequest {
        /// Originating chain
        source_chain: ChainIdentity,
        /// Source-side nonce
        cross_talk_nonce: u64,
    },

    /// Destination address and payload arrays differ in length.
    #[error("Malformed batch: {0}")]
    MalformedBatch(#[from] TypeError),

    /// Caller is not the gateway owner.
    #[error("Unauthorized caller 0x{}", hex::encode(.0))]
    Unauthorized(Address),

    /// The gateway has not been initialized.
    #[error("Gateway not initialized")]
    NotInitialized,

    /// `initialize` called twice.
    #[error("Gateway already initialized")]
    AlreadyInitialized,

    /// Configuration rejected at load time.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Withdrawal exceeds collected fees.
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        /// Amount asked for
        requested: u128,
        /// Collected fees
        available: u128,
    },

    /// The origin-side handler rejected an acknowledgment.
    #[error("Acknowledgment handler reverted: 0x{}", hex::encode(.revert_data))]
    AckHandlerFailed {
        /// Raw revert data returned by the handler
        revert_data: Vec<u8>,
    },

    /// ABI encoding or decoding failed.
    #[error("Codec error: {0}")]
    Codec(String),
}

impl GatewayError {
    /// Short label for metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Verification(e) => e.reason(),
            Self::FeeNotSet { .. } => "fee_not_set",
            Self::InsufficientFee { .. } => "insufficient_fee",
            Self::RequestExpired { .. } => "expired",
            Self::ReplayedRequest { .. } => "replayed",
            Self::MalformedBatch(_) => "malformed_batch",
            Self::Unauthorized(_) => "unauthorized",
            Self::NotInitialized => "not_initialized",
            Self::AlreadyInitialized => "already_initialized",
            Self::InvalidConfig(_) => "invalid_config",
            Self::InsufficientBalance { .. } => "insufficient_balance",
            Self::AckHandlerFailed { .. } => "ack_handler_failed",
            Self::Codec(_) => "codec",
        }
    }
}

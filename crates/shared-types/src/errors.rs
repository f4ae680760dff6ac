//! # Error Types
//!
//! Shape errors raised while interpreting shared entities.

use thiserror::Error;

/// Errors raised by shared entity conversions and shape checks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    /// Unknown acknowledgment policy value.
    #[error("Invalid ack type: {0}")]
    InvalidAckType(u8),

    /// Destination addresses and payloads are not parallel.
    #[error("Batch length mismatch: {addresses} addresses, {payloads} payloads")]
    BatchLengthMismatch { addresses: usize, payloads: usize },
}

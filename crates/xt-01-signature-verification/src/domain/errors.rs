//! # Verification Errors
//!
//! `SignatureError` covers a single signature; `VerificationError` covers a
//! signature set checked against a validator set.

use shared_types::Address;
use thiserror::Error;

/// Errors that can occur while recovering one signer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// R or S is zero or not below the curve order
    #[error("Invalid signature format")]
    InvalidFormat,

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover public key from signature
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Recovered signer is not a member of the validator set
    #[error("Signer {} is not a validator", hex_address(.0))]
    UnknownSigner(Address),
}

/// Errors raised when checking a signature set against a validator set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// A signature failed to recover, or recovered to a non-member.
    #[error("Invalid signature at index {index}: {cause}")]
    InvalidSignature {
        /// Position in the submitted signature array
        index: usize,
        /// Why the signature was rejected
        cause: SignatureError,
    },

    /// Recovered signers are not strictly ascending (duplicate or reordered).
    #[error("Signature at index {index} is duplicated or out of order")]
    DuplicateOrUnordered {
        /// Position of the first offending signature
        index: usize,
    },

    /// Accumulated power is below two thirds of the total.
    #[error("Insufficient voting power: {accumulated} of {total}")]
    InsufficientPower {
        /// Power carried by the valid signatures
        accumulated: u64,
        /// Total power of the set
        total: u64,
    },

    /// Supplied set does not carry the stored epoch nonce.
    #[error("Stale validator set: expected nonce {expected}, got {supplied}")]
    StaleValidatorSet {
        /// Stored nonce
        expected: u64,
        /// Nonce of the supplied set
        supplied: u64,
    },

    /// Supplied set carries the stored nonce but a different roster.
    #[error("Validator set does not match stored checkpoint at nonce {nonce}")]
    ValidatorSetMismatch {
        /// Shared nonce
        nonce: u64,
    },

    /// A proposed set does not advance the epoch.
    #[error("Validator set nonce must increase: current {current}, proposed {proposed}")]
    NonceNotIncreasing {
        /// Stored nonce
        current: u64,
        /// Proposed nonce
        proposed: u64,
    },

    /// Roster shape is unusable.
    #[error("Malformed validator set: {0}")]
    MalformedValidatorSet(String),
}

impl VerificationError {
    /// Short label for metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidSignature { .. } => "invalid_signature",
            Self::DuplicateOrUnordered { .. } => "duplicate_or_unordered",
            Self::InsufficientPower { .. } => "insufficient_power",
            Self::StaleValidatorSet { .. } => "stale_valset",
            Self::ValidatorSetMismatch { .. } => "valset_mismatch",
            Self::NonceNotIncreasing { .. } => "nonce_not_increasing",
            Self::MalformedValidatorSet(_) => "malformed_valset",
        }
    }
}

fn hex_address(address: &Address) -> String {
    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for byte in address {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}

//! # Canonical Encodings
//!
//! Solidity-compatible ABI layouts for everything validators sign and every
//! byte string an acknowledgment carries.
//!
//! Signed messages:
//!
//! ```text
//! requestFromSource: (bytes32 tag, uint64 eventIdentifier, uint64 crossTalkNonce,
//!                     uint64 srcChainType, string srcChainId, string destChainId,
//!                     uint64 destChainType, bytes caller, bool isAtomic,
//!                     uint64 expTimestamp, bytes[] destAddresses, bytes[] payloads)
//! crossTalkAck:      (bytes32 tag, uint64 eventIdentifier, uint64 crossTalkNonce,
//!                     uint64 ownChainType, string ownChainId, uint64 destChainType,
//!                     string destChainId, bytes srcContractAddress, bool[] execFlags,
//!                     bytes[] execData)
//! ```

use crate::domain::GatewayError;
use alloy_primitives::{Bytes, FixedBytes};
use alloy_sol_types::{sol, Revert, SolError, SolValue};
use shared_types::{ChainIdentity, CrossTalkAckPayload, CrossTalkPayload, Hash};
use xt_01_signature_verification::{keccak256, method_tag};

/// Tag of the inbound execution message.
pub const REQUEST_FROM_SOURCE_METHOD: [u8; 32] = method_tag("requestFromSource");

/// Tag of the acknowledgment message.
pub const CROSS_TALK_ACK_METHOD: [u8; 32] = method_tag("crossTalkAck");

/// Revert reason for calls to an address with no handler.
pub const NO_HANDLER_REASON: &str = "no handler registered at destination";

sol! {
    /// Envelope reporting a failed atomic batch.
    #[derive(Debug, PartialEq, Eq)]
    error ExecuteCallsRevert(bool[] flags, bytes[] data);

    /// Application error carrying a message.
    #[derive(Debug, PartialEq, Eq)]
    error CustomError(string message);
}

fn to_bytes_vec(items: &[Vec<u8>]) -> Vec<Bytes> {
    items.iter().map(|b| Bytes::copy_from_slice(b)).collect()
}

/// Encoding signed for `requestFromSource`; `dest` is the executing chain.
pub fn encode_request_from_source(payload: &CrossTalkPayload, dest: &ChainIdentity) -> Vec<u8> {
    let source = &payload.source_params;
    (
        FixedBytes::<32>::from(REQUEST_FROM_SOURCE_METHOD),
        payload.event_identifier,
        payload.cross_talk_nonce,
        source.chain_type.as_u64(),
        source.chain_id.clone(),
        dest.chain_id.clone(),
        dest.chain_type.as_u64(),
        Bytes::copy_from_slice(&source.caller),
        payload.is_atomic,
        payload.exp_timestamp,
        to_bytes_vec(&payload.contract_calls.dest_contract_addresses),
        to_bytes_vec(&payload.contract_calls.payloads),
    )
        .abi_encode_params()
}

/// Message hash validators sign for `requestFromSource`.
pub fn request_from_source_hash(payload: &CrossTalkPayload, dest: &ChainIdentity) -> Hash {
    keccak256(&encode_request_from_source(payload, dest))
}

/// Encoding signed for `crossTalkAck`; `own` is the chain receiving the ack.
pub fn encode_cross_talk_ack(ack: &CrossTalkAckPayload, own: &ChainIdentity) -> Vec<u8> {
    (
        FixedBytes::<32>::from(CROSS_TALK_ACK_METHOD),
        ack.event_identifier,
        ack.cross_talk_nonce,
        own.chain_type.as_u64(),
        own.chain_id.clone(),
        ack.dest_chain_type.as_u64(),
        ack.dest_chain_id.clone(),
        Bytes::copy_from_slice(&ack.src_contract_address),
        ack.exec_flags.clone(),
        to_bytes_vec(&ack.exec_data),
    )
        .abi_encode_params()
}

/// Message hash validators sign for `crossTalkAck`.
pub fn cross_talk_ack_hash(ack: &CrossTalkAckPayload, own: &ChainIdentity) -> Hash {
    keccak256(&encode_cross_talk_ack(ack, own))
}

/// `abi.encode(bool[] flags, bytes[] data)`.
pub fn encode_exec_result(flags: &[bool], data: &[Vec<u8>]) -> Vec<u8> {
    (flags.to_vec(), to_bytes_vec(data)).abi_encode_params()
}

/// Inverse of [`encode_exec_result`].
pub fn decode_exec_result(payload: &[u8]) -> Result<(Vec<bool>, Vec<Vec<u8>>), GatewayError> {
    let (flags, data) = <(Vec<bool>, Vec<Bytes>)>::abi_decode_params(payload, true)
        .map_err(|e| GatewayError::Codec(e.to_string()))?;
    Ok((flags, data.into_iter().map(|b| b.to_vec()).collect()))
}

/// Return data of a call that returned `bytes`: `abi.encode(bytes)`.
pub fn encode_bytes_return(inner: &[u8]) -> Vec<u8> {
    (Bytes::copy_from_slice(inner),).abi_encode_params()
}

/// Inverse of [`encode_bytes_return`].
pub fn decode_bytes_return(data: &[u8]) -> Result<Vec<u8>, GatewayError> {
    let (inner,) = <(Bytes,)>::abi_decode_params(data, true)
        .map_err(|e| GatewayError::Codec(e.to_string()))?;
    Ok(inner.to_vec())
}

/// Standard `Error(string)` revert data.
pub fn encode_revert_reason(reason: &str) -> Vec<u8> {
    Revert {
        reason: reason.to_string(),
    }
    .abi_encode()
}

/// Envelope for a failed atomic batch.
pub fn encode_atomic_failure(flags: &[bool], data: &[Vec<u8>]) -> Vec<u8> {
    ExecuteCallsRevert {
        flags: flags.to_vec(),
        data: to_bytes_vec(data),
    }
    .abi_encode()
}

/// A decoded atomic failure envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtomicFailure {
    /// Outcome of each attempted call
    pub flags: Vec<bool>,
    /// Return or revert data of each attempted call
    pub data: Vec<Vec<u8>>,
}

impl AtomicFailure {
    /// Index of the call that aborted the batch.
    pub fn failing_index(&self) -> Option<usize> {
        self.flags.len().checked_sub(1)
    }

    /// Raw revert data of the failing call.
    pub fn revert_data(&self) -> Option<&[u8]> {
        self.data.last().map(Vec::as_slice)
    }
}

/// Decode an `ExecuteCallsRevert` envelope. `None` if `payload` is not one.
pub fn decode_atomic_failure(payload: &[u8]) -> Option<AtomicFailure> {
    let envelope = ExecuteCallsRevert::abi_decode(payload, true).ok()?;
    Some(AtomicFailure {
        flags: envelope.flags,
        data: envelope.data.into_iter().map(|b| b.to_vec()).collect(),
    })
}

/// Human-readable message of `Error(string)` or `CustomError(string)` revert data.
pub fn decode_revert_message(data: &[u8]) -> Option<String> {
    if let Ok(revert) = Revert::abi_decode(data, true) {
        return Some(revert.reason);
    }
    CustomError::abi_decode(data, true).ok().map(|e| e.message)
}

//! # Gateway Events
//!
//! Records emitted by a gateway for relayers to observe. Field order follows
//! the on-chain event layouts relayers already index.

use crate::entities::{
    AckType, Address, ChainIdentity, ChainType, ContractCallBatch, CrossTalkAckPayload,
    DestChainParams, GasParams,
};
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};

/// Emitted at initialization and on every validator-set update.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValsetUpdatedEvent {
    /// Epoch nonce of the new set.
    pub valset_nonce: u64,
    /// Gateway-wide event nonce.
    pub event_nonce: u64,
    /// Chain the gateway lives on.
    pub chain: ChainIdentity,
    /// Validator addresses.
    #[serde_as(as = "Vec<Hex>")]
    pub validators: Vec<Address>,
    /// Voting powers, parallel to `validators`.
    pub powers: Vec<u32>,
}

/// `[requestIdentifier, timestamp, isAtomic, srcChainType, srcChainId]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrcChainParams {
    /// Per-destination request counter.
    pub request_identifier: u64,
    /// Caller-supplied timestamp.
    pub timestamp: u64,
    /// Atomic execution requested.
    pub is_atomic: bool,
    /// Origin chain family.
    pub src_chain_type: ChainType,
    /// Origin chain id.
    pub src_chain_id: String,
}

/// Canonical outbound request record.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestToDestEvent {
    /// Caller identity as lowercase `0x` hex.
    pub sender: String,
    /// Gateway-wide event nonce.
    pub event_nonce: u64,
    /// Source-side parameters.
    pub src_chain_params: SrcChainParams,
    /// Gas parameters for the acknowledgment leg.
    pub ack_gas_params: GasParams,
    /// Destination parameters. Type, gas limit and gas price are emitted as zero.
    pub dest_chain_params: DestChainParams,
    /// Calls to execute on the destination, verbatim.
    pub contract_calls: ContractCallBatch,
    /// Acknowledgment policy.
    pub ack_type: AckType,
    /// Caller address.
    #[serde_as(as = "Hex")]
    pub caller: Address,
    /// Reserved trailing flag, always false.
    pub is_read_call: bool,
}

/// Execution report emitted by the destination gateway.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossTalkAckEvent {
    /// Relayer address echoed from the inbound payload.
    pub relayer_router_address: String,
    /// Caller on the source chain.
    #[serde_as(as = "Hex")]
    pub caller: Vec<u8>,
    /// Chain the request came from.
    pub src_chain: ChainIdentity,
    /// Chain that executed the batch (the emitting gateway).
    pub dest_chain: ChainIdentity,
    /// Event identifier of the request.
    pub event_identifier: u64,
    /// Per-source acknowledgment counter.
    pub ack_request_identifier: u64,
    /// Gateway-wide event nonce.
    pub event_nonce: u64,
    /// ABI-encoded execution result.
    #[serde_as(as = "Hex")]
    pub exec_payload: Vec<u8>,
    /// Acknowledgment policy echo.
    pub ack_type: AckType,
    /// True only if every call succeeded.
    pub success: bool,
    /// Nonce of the request.
    pub cross_talk_nonce: u64,
    /// Decoded per-call flags.
    pub exec_flags: Vec<bool>,
    /// Decoded per-call data.
    #[serde_as(as = "Vec<Hex>")]
    pub exec_data: Vec<Vec<u8>>,
}

impl CrossTalkAckEvent {
    /// Build the payload a relayer submits to the origin gateway's `crossTalkAck`.
    pub fn to_ack_payload(&self) -> CrossTalkAckPayload {
        CrossTalkAckPayload {
            cross_talk_nonce: self.cross_talk_nonce,
            event_identifier: self.event_identifier,
            dest_chain_type: self.dest_chain.chain_type,
            dest_chain_id: self.dest_chain.chain_id.clone(),
            src_contract_address: self.caller.clone(),
            exec_flags: self.exec_flags.clone(),
            exec_data: self.exec_data.clone(),
        }
    }
}

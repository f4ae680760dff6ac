//! Fixtures for gateway tests across the workspace: a validator roster that
//! signs like the off-chain signers do, and sample destination handlers.

use crate::algorithms::abi::{cross_talk_ack_hash, request_from_source_hash, CustomError};
use crate::domain::{ContractStorage, FeeEntry, GatewayConfig, OutboundRequest};
use crate::ports::outbound::{CrossTalkHandler, HandlerRevert, RequestContext};
use alloy_sol_types::SolValue;
use shared_types::{
    AckType, Address, ChainIdentity, ChainType, ContractCallBatch, CrossTalkAckPayload,
    CrossTalkPayload, DestChainParams, GasParams, Hash, SourceParams,
};
use xt_01_signature_verification::test_helpers::{sign_all, sorted_validators, TestValidator};
use xt_01_signature_verification::{EcdsaSignature, ValidatorSet};

/// Chain id of the gateway under test.
pub const CHAIN_ID: &str = "1";
/// Chain id of the remote gateway.
pub const DEST_CHAIN_ID: &str = "2";
/// Chain type of both gateways.
pub const CHAIN_TYPE: ChainType = ChainType::COSMOS;
/// Gateway owner.
pub const OWNER: Address = [0x01; 20];
/// Relayer reward address echoed in acknowledgments.
pub const RELAYER_ROUTER_ADDRESS: &str =
    "router1hrpna9v7vs3stzyd4z3xf00676kf78zpe2u5ksvljswn2vnjp3ys8kpdc7";
/// Block time used by the fixtures.
pub const NOW: u64 = 1_681_014_199;

/// Storage key of the greeting.
pub const GREETING_KEY: &[u8] = b"greeting";
/// Storage key of the last acknowledged nonce.
pub const LAST_ACK_KEY: &[u8] = b"last_ack";

/// A validator roster with signing keys.
pub struct TestValidators {
    /// Keys, sorted by address
    pub validators: Vec<TestValidator>,
    /// Power of each validator
    pub powers: Vec<u32>,
    /// Epoch nonce
    pub valset_nonce: u64,
}

impl TestValidators {
    /// `n` validators. A single validator holds `u32::MAX`; larger rosters hold 100 each.
    pub fn new(n: usize) -> Self {
        let powers = if n == 1 { vec![u32::MAX] } else { vec![100; n] };
        Self::with_powers(&powers)
    }

    /// One validator per power entry.
    pub fn with_powers(powers: &[u32]) -> Self {
        Self {
            validators: sorted_validators(powers.len()),
            powers: powers.to_vec(),
            valset_nonce: 1,
        }
    }

    /// Successor roster with fresh keys.
    pub fn successor(&self, powers: &[u32]) -> Self {
        let mut next = Self::with_powers(powers);
        next.valset_nonce = self.valset_nonce + 1;
        next
    }

    /// The roster as a validator set.
    pub fn valset(&self) -> ValidatorSet {
        ValidatorSet {
            validators: self.validators.iter().map(|v| v.address).collect(),
            powers: self.powers.clone(),
            valset_nonce: self.valset_nonce,
        }
    }

    /// Gateway configuration using this roster.
    pub fn config(&self, chain_id: &str) -> GatewayConfig {
        GatewayConfig {
            chain_id: chain_id.to_string(),
            chain_type: CHAIN_TYPE,
            owner: OWNER,
            validators: self.valset().validators,
            powers: self.powers.clone(),
            valset_nonce: self.valset_nonce,
            min_total_power: 1,
            fees: vec![FeeEntry {
                ack_type: AckType::AckOnSuccessOrFail,
                dest_chain_id: if chain_id == DEST_CHAIN_ID { CHAIN_ID } else { DEST_CHAIN_ID }
                    .to_string(),
                amount: 1000,
            }],
        }
    }

    /// Signatures of every validator, ascending.
    pub fn sign(&self, message_hash: &Hash) -> Vec<EcdsaSignature> {
        self.sign_by(&(0..self.validators.len()).collect::<Vec<_>>(), message_hash)
    }

    /// Signatures of the validators at `indices`, in that order.
    pub fn sign_by(&self, indices: &[usize], message_hash: &Hash) -> Vec<EcdsaSignature> {
        let signers: Vec<&TestValidator> = indices.iter().map(|i| &self.validators[*i]).collect();
        sign_all(&signers, message_hash)
    }

    /// Full-roster signatures over an inbound request executed on `dest`.
    pub fn sign_request(&self, payload: &CrossTalkPayload, dest: &ChainIdentity) -> Vec<EcdsaSignature> {
        self.sign(&request_from_source_hash(payload, dest))
    }

    /// Full-roster signatures over an ack delivered to `own`.
    pub fn sign_ack(&self, ack: &CrossTalkAckPayload, own: &ChainIdentity) -> Vec<EcdsaSignature> {
        self.sign(&cross_talk_ack_hash(ack, own))
    }
}

/// `abi.encode(string)` payload for [`GreetingHandler`].
pub fn greeting_payload(greeting: &str) -> Vec<u8> {
    (greeting.to_string(),).abi_encode_params()
}

/// Stores a greeting. Rejects the empty string with
/// `CustomError("String should not be empty")` and returns
/// `abi.encode(string srcChainId, uint64 srcChainType)`.
#[derive(Debug, Default)]
pub struct GreetingHandler;

impl CrossTalkHandler for GreetingHandler {
    fn handle_request_from_source(
        &self,
        ctx: &RequestContext,
        payload: &[u8],
        storage: &mut ContractStorage<'_>,
    ) -> Result<Vec<u8>, HandlerRevert> {
        let (greeting,) = <(String,)>::abi_decode_params(payload, true)
            .map_err(|_| HandlerRevert::reason("malformed greeting"))?;
        if greeting.is_empty() {
            return Err(HandlerRevert::error(&CustomError {
                message: "String should not be empty".into(),
            }));
        }
        storage.set(GREETING_KEY, greeting.into_bytes());
        Ok((ctx.source.chain_id.clone(), ctx.source.chain_type.as_u64()).abi_encode_params())
    }

    fn handle_cross_talk_ack(
        &self,
        ack: &CrossTalkAckPayload,
        storage: &mut ContractStorage<'_>,
    ) -> Result<(), HandlerRevert> {
        storage.set(LAST_ACK_KEY, ack.cross_talk_nonce.to_be_bytes().to_vec());
        Ok(())
    }
}

/// Accepts every request and rejects every acknowledgment.
#[derive(Debug, Default)]
pub struct AckRejectingHandler;

impl CrossTalkHandler for AckRejectingHandler {
    fn handle_request_from_source(
        &self,
        _ctx: &RequestContext,
        _payload: &[u8],
        _storage: &mut ContractStorage<'_>,
    ) -> Result<Vec<u8>, HandlerRevert> {
        Ok(Vec::new())
    }

    fn handle_cross_talk_ack(
        &self,
        _ack: &CrossTalkAckPayload,
        storage: &mut ContractStorage<'_>,
    ) -> Result<(), HandlerRevert> {
        storage.set(LAST_ACK_KEY, b"partial".to_vec());
        Err(HandlerRevert::reason("ack rejected"))
    }
}

/// Inbound payload from `caller` on (`CHAIN_TYPE`, `CHAIN_ID`).
pub fn inbound_payload(caller: &[u8], is_atomic: bool, calls: ContractCallBatch) -> CrossTalkPayload {
    CrossTalkPayload {
        relayer_router_address: RELAYER_ROUTER_ADDRESS.to_string(),
        is_atomic,
        event_identifier: 1,
        exp_timestamp: NOW,
        cross_talk_nonce: 11,
        source_params: SourceParams {
            caller: caller.to_vec(),
            chain_type: CHAIN_TYPE,
            chain_id: CHAIN_ID.to_string(),
        },
        contract_calls: calls,
        is_read_call: false,
        ack_type: AckType::NoAck,
    }
}

/// Outbound request with one call and `ACK_ON_SUCCESS_OR_FAIL`.
pub fn outbound_request(dest_chain_id: &str) -> OutboundRequest {
    OutboundRequest {
        timestamp: NOW,
        is_atomic: false,
        ack_type: AckType::AckOnSuccessOrFail,
        src_chain_gas_params: GasParams {
            gas_limit: 2_000_000,
            gas_price: 1_000_000_000,
        },
        dest_chain_params: DestChainParams {
            gas_limit: 300_000,
            gas_price: 1_000_000_000,
            dest_chain_type: CHAIN_TYPE,
            dest_chain_id: dest_chain_id.to_string(),
        },
        contract_calls: ContractCallBatch::empty()
            .with_call(vec![0xaa; 20], greeting_payload("HelloString")),
    }
}

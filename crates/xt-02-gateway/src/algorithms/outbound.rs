//! # Outbound Request Builder
//!
//! Prices, sequences and describes a `requestToDest` call. The event is the
//! only external effect; it is built after every counter has moved.

use crate::domain::{
    invariant_batch_shape, FeeTable, GatewayError, NonceLedger, OutboundRequest, TxContext,
};
use shared_types::{Address, ChainIdentity, DestChainParams, RequestToDestEvent, SrcChainParams};

/// Lowercase `0x` hex of an address.
pub fn caller_identity(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// Check the request and its fee without changing anything.
///
/// Returns the fee the request pays.
pub fn validate_request(
    fees: &FeeTable,
    ctx: &TxContext,
    request: &OutboundRequest,
) -> Result<u128, GatewayError> {
    invariant_batch_shape(&request.contract_calls)?;
    fees.charge(
        request.ack_type,
        &request.dest_chain_params.dest_chain_id,
        ctx.value,
    )
}

/// Assign the request identifier and event nonce, and build the event.
///
/// Call only after [`validate_request`] succeeded.
pub fn sequence_request(
    nonces: &mut NonceLedger,
    own: &ChainIdentity,
    ctx: &TxContext,
    request: OutboundRequest,
) -> RequestToDestEvent {
    let request_identifier = nonces.next_request_identifier(&request.dest_chain_params.identity());
    let event_nonce = nonces.next_event_nonce();

    RequestToDestEvent {
        sender: caller_identity(&ctx.sender),
        event_nonce,
        src_chain_params: SrcChainParams {
            request_identifier,
            timestamp: request.timestamp,
            is_atomic: request.is_atomic,
            src_chain_type: own.chain_type,
            src_chain_id: own.chain_id.clone(),
        },
        ack_gas_params: request.src_chain_gas_params,
        // Only the destination chain id is echoed.
        dest_chain_params: DestChainParams {
            gas_limit: 0,
            gas_price: 0,
            dest_chain_type: Default::default(),
            dest_chain_id: request.dest_chain_params.dest_chain_id,
        },
        contract_calls: request.contract_calls,
        ack_type: request.ack_type,
        caller: ctx.sender,
        is_read_call: false,
    }
}

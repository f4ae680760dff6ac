//! # Inbound Executor
//!
//! Checks applied to a `requestFromSource` submission, in order:
//!
//! 1. batch shape
//! 2. expiry (`expTimestamp < blockTimestamp` is expired)
//! 3. validator set is the stored one
//! 4. quorum over the canonical request hash
//! 5. replay guard, marked consumed before execution
//!
//! Steps 3 and 4 live in the signature-verification subsystem; this module
//! provides the pure pieces around them.

use super::execution::BatchOutcome;
use crate::domain::{invariant_batch_shape, invariant_not_expired, GatewayError, TxContext};
use crate::ports::outbound::RequestContext;
use shared_types::{ChainIdentity, CrossTalkAckEvent, CrossTalkPayload};

/// Stateless pre-checks (steps 1 and 2).
pub fn precheck(payload: &CrossTalkPayload, ctx: &TxContext) -> Result<(), GatewayError> {
    invariant_batch_shape(&payload.contract_calls)?;
    invariant_not_expired(payload.exp_timestamp, ctx.block_timestamp)
}

/// Context handed to each destination handler.
pub fn request_context(payload: &CrossTalkPayload) -> RequestContext {
    RequestContext {
        source: payload.source_params.identity(),
        caller: payload.source_params.caller.clone(),
        event_identifier: payload.event_identifier,
        cross_talk_nonce: payload.cross_talk_nonce,
        is_read_call: payload.is_read_call,
    }
}

/// Sequencing markers of an acknowledgment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AckMarkers {
    /// Per-source acknowledgment counter
    pub ack_request_identifier: u64,
    /// Gateway-wide event nonce
    pub event_nonce: u64,
}

/// Acknowledgment event for an executed batch.
pub fn build_ack_event(
    payload: &CrossTalkPayload,
    own: &ChainIdentity,
    markers: AckMarkers,
    outcome: BatchOutcome,
) -> CrossTalkAckEvent {
    CrossTalkAckEvent {
        relayer_router_address: payload.relayer_router_address.clone(),
        caller: payload.source_params.caller.clone(),
        src_chain: payload.source_params.identity(),
        dest_chain: own.clone(),
        event_identifier: payload.event_identifier,
        ack_request_identifier: markers.ack_request_identifier,
        event_nonce: markers.event_nonce,
        exec_payload: outcome.exec_payload,
        ack_type: payload.ack_type,
        success: outcome.success,
        cross_talk_nonce: payload.cross_talk_nonce,
        exec_flags: outcome.exec_flags,
        exec_data: outcome.exec_data,
    }
}

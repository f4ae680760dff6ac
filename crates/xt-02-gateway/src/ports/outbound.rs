//! # Outbound Ports
//!
//! Applications the gateway calls into. Event publication goes through
//! `shared_bus::EventPublisher`.

use crate::algorithms::abi::encode_revert_reason;
use crate::domain::ContractStorage;
use alloy_sol_types::SolError;
use shared_types::{ChainIdentity, CrossTalkAckPayload};

/// Who asked for a destination call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestContext {
    /// Originating chain
    pub source: ChainIdentity,
    /// Application on the originating chain
    pub caller: Vec<u8>,
    /// Source-side event identifier
    pub event_identifier: u64,
    /// Source-side nonce
    pub cross_talk_nonce: u64,
    /// Effects will be discarded
    pub is_read_call: bool,
}

/// Raw revert data returned by a failing handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerRevert(pub Vec<u8>);

impl HandlerRevert {
    /// `Error(string)` revert.
    pub fn reason(reason: &str) -> Self {
        Self(encode_revert_reason(reason))
    }

    /// Revert with a custom ABI error.
    pub fn error<E: SolError>(error: &E) -> Self {
        Self(error.abi_encode())
    }

    /// Revert data.
    pub fn data(&self) -> &[u8] {
        &self.0
    }
}

/// A destination application registered on the gateway.
///
/// Handlers only see their own storage namespace. An `Err` discards every
/// write the handler made during the call.
pub trait CrossTalkHandler: Send + Sync {
    /// Execute one inbound call. The returned bytes are the handler's
    /// `bytes` return value.
    fn handle_request_from_source(
        &self,
        ctx: &RequestContext,
        payload: &[u8],
        storage: &mut ContractStorage<'_>,
    ) -> Result<Vec<u8>, HandlerRevert>;

    /// Receive the acknowledgment of a request this handler sent.
    fn handle_cross_talk_ack(
        &self,
        _ack: &CrossTalkAckPayload,
        _storage: &mut ContractStorage<'_>,
    ) -> Result<(), HandlerRevert> {
        Ok(())
    }
}

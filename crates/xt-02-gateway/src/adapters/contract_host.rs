//! Contract Host Adapter
//!
//! Routes destination calls to registered `CrossTalkHandler`s and captures
//! their failures as data.

use crate::algorithms::abi::{encode_bytes_return, encode_revert_reason, NO_HANDLER_REASON};
use crate::domain::{ContractStorage, Overlay, StateLayer};
use crate::ports::outbound::{CrossTalkHandler, HandlerRevert, RequestContext};
use shared_types::CrossTalkAckPayload;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of one captured call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallResult {
    /// The handler returned normally
    pub success: bool,
    /// ABI-encoded return value on success, raw revert data on failure
    pub data: Vec<u8>,
}

/// Handler registry by raw address bytes.
#[derive(Default, Clone)]
pub struct ContractHost {
    handlers: HashMap<Vec<u8>, Arc<dyn CrossTalkHandler>>,
}

impl ContractHost {
    /// Host with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the handler at `address`.
    pub fn register(&mut self, address: impl Into<Vec<u8>>, handler: Arc<dyn CrossTalkHandler>) {
        let address = address.into();
        info!("[xt-02] handler registered at 0x{}", hex::encode(&address));
        self.handlers.insert(address, handler);
    }

    /// Is a handler registered at `address`?
    pub fn is_registered(&self, address: &[u8]) -> bool {
        self.handlers.contains_key(address)
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Call the handler at `dest` in its own overlay on `layer`.
    ///
    /// Never fails: a missing handler or a revert comes back as
    /// `success = false` with the revert data, and leaves `layer` untouched.
    pub fn try_call(
        &self,
        layer: &mut dyn StateLayer,
        ctx: &RequestContext,
        dest: &[u8],
        payload: &[u8],
    ) -> CallResult {
        let Some(handler) = self.handlers.get(dest) else {
            debug!("[xt-02] no handler at 0x{}", hex::encode(dest));
            return CallResult {
                success: false,
                data: encode_revert_reason(NO_HANDLER_REASON),
            };
        };

        let mut overlay = Overlay::new(layer);
        let result = {
            let mut storage = ContractStorage::new(dest, &mut overlay);
            handler.handle_request_from_source(ctx, payload, &mut storage)
        };

        match result {
            Ok(ret) => {
                overlay.commit();
                CallResult {
                    success: true,
                    data: encode_bytes_return(&ret),
                }
            }
            Err(HandlerRevert(data)) => {
                debug!(
                    "[xt-02] call to 0x{} reverted ({} bytes)",
                    hex::encode(dest),
                    data.len()
                );
                CallResult {
                    success: false,
                    data,
                }
            }
        }
    }

    /// Hand an acknowledgment to the handler at its source contract.
    ///
    /// Returns `Ok(false)` when no handler is registered there. Writes reach
    /// `layer` only if the handler accepts.
    pub fn deliver_ack(
        &self,
        layer: &mut dyn StateLayer,
        ack: &CrossTalkAckPayload,
    ) -> Result<bool, HandlerRevert> {
        let address = ack.src_contract_address.as_slice();
        let Some(handler) = self.handlers.get(address) else {
            return Ok(false);
        };

        let mut overlay = Overlay::new(layer);
        {
            let mut storage = ContractStorage::new(address, &mut overlay);
            handler.handle_cross_talk_ack(ack, &mut storage)?;
        }
        overlay.commit();
        Ok(true)
    }
}

impl std::fmt::Debug for ContractHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut addresses: Vec<String> = self.handlers.keys().map(hex::encode).collect();
        addresses.sort();
        f.debug_struct("ContractHost")
            .field("handlers", &addresses)
            .finish()
    }
}

//! # Batch Execution
//!
//! Runs a contract-call batch under one of two policies:
//!
//! - **Atomic**: all calls share one batch overlay. The first failure drops
//!   the overlay and the batch reports an `ExecuteCallsRevert` envelope
//!   holding the attempts up to and including the failing call.
//! - **Non-atomic**: every call commits or rolls back on its own.

use super::abi::{encode_atomic_failure, encode_exec_result};
use crate::adapters::contract_host::ContractHost;
use crate::domain::{Overlay, StateLayer};
use crate::ports::outbound::RequestContext;
use shared_types::ContractCallBatch;
use tracing::debug;

/// What the acknowledgment reports about a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Per-call success flags
    pub exec_flags: Vec<bool>,
    /// Per-call return data, or the failure envelope for a failed atomic batch
    pub exec_data: Vec<Vec<u8>>,
    /// Encoded acknowledgment payload
    pub exec_payload: Vec<u8>,
    /// Every call succeeded
    pub success: bool,
}

impl BatchOutcome {
    fn completed(exec_flags: Vec<bool>, exec_data: Vec<Vec<u8>>) -> Self {
        let exec_payload = encode_exec_result(&exec_flags, &exec_data);
        let success = exec_flags.iter().all(|f| *f);
        Self {
            exec_flags,
            exec_data,
            exec_payload,
            success,
        }
    }

    fn atomic_failure(batch_len: usize, attempted_flags: &[bool], attempted_data: &[Vec<u8>]) -> Self {
        let envelope = encode_atomic_failure(attempted_flags, attempted_data);
        Self {
            exec_flags: vec![false; batch_len],
            exec_data: vec![envelope.clone()],
            exec_payload: envelope,
            success: false,
        }
    }

    /// Number of calls reported as failed.
    pub fn failed_calls(&self) -> usize {
        self.exec_flags.iter().filter(|f| !**f).count()
    }
}

/// Execute `batch` against `layer`.
///
/// The caller has already checked the batch shape.
pub fn execute_batch(
    host: &ContractHost,
    layer: &mut dyn StateLayer,
    ctx: &RequestContext,
    batch: &ContractCallBatch,
    is_atomic: bool,
) -> BatchOutcome {
    if batch.is_empty() {
        return BatchOutcome::completed(Vec::new(), Vec::new());
    }
    if is_atomic {
        execute_atomic(host, layer, ctx, batch)
    } else {
        execute_independent(host, layer, ctx, batch)
    }
}

fn execute_atomic(
    host: &ContractHost,
    layer: &mut dyn StateLayer,
    ctx: &RequestContext,
    batch: &ContractCallBatch,
) -> BatchOutcome {
    let batch_len = batch.dest_contract_addresses.len();
    let mut overlay = Overlay::new(layer);
    let mut flags = Vec::with_capacity(batch_len);
    let mut data = Vec::with_capacity(batch_len);

    for (index, (dest, payload)) in batch.calls().enumerate() {
        let result = host.try_call(&mut overlay, ctx, dest, payload);
        flags.push(result.success);
        data.push(result.data);

        if !result.success {
            debug!(index, "[xt-02] atomic batch aborted");
            return BatchOutcome::atomic_failure(batch_len, &flags, &data);
        }
    }

    overlay.commit();
    BatchOutcome::completed(flags, data)
}

fn execute_independent(
    host: &ContractHost,
    layer: &mut dyn StateLayer,
    ctx: &RequestContext,
    batch: &ContractCallBatch,
) -> BatchOutcome {
    let (flags, data): (Vec<bool>, Vec<Vec<u8>>) = batch
        .calls()
        .map(|(dest, payload)| {
            let result = host.try_call(&mut *layer, ctx, dest, payload);
            (result.success, result.data)
        })
        .unzip();
    BatchOutcome::completed(flags, data)
}

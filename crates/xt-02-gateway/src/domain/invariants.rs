//! # Domain Invariants
//!
//! Preconditions checked before any state change.

use super::entities::TxContext;
use super::errors::GatewayError;
use shared_types::{Address, ContractCallBatch};

/// Invariant: only the owner may administer the gateway.
pub fn invariant_owner(ctx: &TxContext, owner: &Address) -> Result<(), GatewayError> {
    if ctx.sender != *owner {
        return Err(GatewayError::Unauthorized(ctx.sender));
    }
    Ok(())
}

/// Invariant: destination addresses and payloads pair up.
pub fn invariant_batch_shape(batch: &ContractCallBatch) -> Result<usize, GatewayError> {
    Ok(batch.checked_len()?)
}

/// Invariant: an inbound request is executable up to and including its deadline.
pub fn invariant_not_expired(exp_timestamp: u64, block_timestamp: u64) -> Result<(), GatewayError> {
    if exp_timestamp < block_timestamp {
        return Err(GatewayError::RequestExpired {
            exp_timestamp,
            block_timestamp,
        });
    }
    Ok(())
}

//! # Domain Entities
//!
//! Transaction context, outbound request and operation outcomes.

use serde::{Deserialize, Serialize};
use shared_types::{AckType, Address, ContractCallBatch, DestChainParams, GasParams};

/// The caller-side view of one gateway transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TxContext {
    /// Account submitting the transaction
    pub sender: Address,
    /// Native value attached
    pub value: u128,
    /// Block time at execution
    pub block_timestamp: u64,
}

impl TxContext {
    /// Context with no attached value.
    pub fn new(sender: Address, block_timestamp: u64) -> Self {
        Self {
            sender,
            value: 0,
            block_timestamp,
        }
    }

    /// Attach value.
    pub fn with_value(mut self, value: u128) -> Self {
        self.value = value;
        self
    }
}

/// Outbound request as submitted by an application on this chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundRequest {
    /// Caller-supplied timestamp, echoed in the event
    pub timestamp: u64,
    /// All-or-nothing execution at the destination
    pub is_atomic: bool,
    /// Acknowledgment mode
    #[serde(default)]
    pub ack_type: AckType,
    /// Gas parameters for the acknowledgment leg
    pub src_chain_gas_params: GasParams,
    /// Destination chain and its gas parameters
    pub dest_chain_params: DestChainParams,
    /// Calls to execute at the destination
    pub contract_calls: ContractCallBatch,
}

/// Result of delivering an acknowledgment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AckOutcome {
    /// Verified and recorded for the first time.
    Recorded,
    /// Verified, but already recorded earlier. Nothing changed.
    AlreadyProcessed,
}

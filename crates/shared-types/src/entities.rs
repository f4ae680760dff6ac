//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Identity**: `ChainType`, `ChainIdentity`, `Address`
//! - **Outbound**: `GasParams`, `DestChainParams`, `ContractCallBatch`
//! - **Inbound**: `SourceParams`, `CrossTalkPayload`
//! - **Acknowledgment**: `AckType`, `CrossTalkAckPayload`

use crate::errors::TypeError;
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use std::fmt;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// A 32-byte Keccak-256 digest.
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address (validators, gateway callers).
pub type Address = [u8; 20];

/// Chain family discriminator, ABI-encoded as `uint64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainType(pub u64);

impl ChainType {
    /// EVM-compatible chains.
    pub const EVM: ChainType = ChainType(0);
    /// Cosmos SDK chains.
    pub const COSMOS: ChainType = ChainType(1);
    /// Substrate / Polkadot chains.
    pub const POLKADOT: ChainType = ChainType(2);
    /// Solana.
    pub const SOLANA: ChainType = ChainType(3);
    /// NEAR.
    pub const NEAR: ChainType = ChainType(4);

    /// Raw numeric value as it appears on the wire.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::EVM => write!(f, "evm"),
            Self::COSMOS => write!(f, "cosmos"),
            Self::POLKADOT => write!(f, "polkadot"),
            Self::SOLANA => write!(f, "solana"),
            Self::NEAR => write!(f, "near"),
            ChainType(other) => write!(f, "chain-type-{}", other),
        }
    }
}

/// `(chainType, chainId)` pair naming one chain. Equality is exact tuple match.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChainIdentity {
    /// Chain family.
    pub chain_type: ChainType,
    /// Chain id within the family (free-form string, e.g. `"1"` or `"router_9600-1"`).
    pub chain_id: String,
}

impl ChainIdentity {
    /// Create a new chain identity.
    pub fn new(chain_type: ChainType, chain_id: impl Into<String>) -> Self {
        Self {
            chain_type,
            chain_id: chain_id.into(),
        }
    }
}

impl fmt::Display for ChainIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain_type, self.chain_id)
    }
}

// =============================================================================
// CLUSTER B: OUTBOUND
// =============================================================================

/// Acknowledgment policy requested by the origin caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum AckType {
    /// No acknowledgment is delivered back.
    #[default]
    NoAck = 0,
    /// Acknowledge only successful executions.
    AckOnSuccess = 1,
    /// Acknowledge every execution.
    AckOnSuccessOrFail = 2,
    /// Acknowledge only failed executions.
    AckOnError = 3,
}

impl AckType {
    /// Wire value (`uint8`).
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for AckType {
    type Error = TypeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NoAck),
            1 => Ok(Self::AckOnSuccess),
            2 => Ok(Self::AckOnSuccessOrFail),
            3 => Ok(Self::AckOnError),
            other => Err(TypeError::InvalidAckType(other)),
        }
    }
}

/// Gas limit and price pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GasParams {
    /// Gas limit.
    pub gas_limit: u64,
    /// Gas price.
    pub gas_price: u64,
}

/// Destination chain parameters supplied with an outbound request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestChainParams {
    /// Destination gas limit.
    pub gas_limit: u64,
    /// Destination gas price.
    pub gas_price: u64,
    /// Destination chain family.
    pub dest_chain_type: ChainType,
    /// Destination chain id.
    pub dest_chain_id: String,
}

impl DestChainParams {
    /// Identity of the destination chain.
    pub fn identity(&self) -> ChainIdentity {
        ChainIdentity::new(self.dest_chain_type, self.dest_chain_id.clone())
    }
}

/// Ordered batch of destination calls. `dest_contract_addresses[i]` receives `payloads[i]`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContractCallBatch {
    /// Raw destination addresses, one per call.
    #[serde_as(as = "Vec<Hex>")]
    pub dest_contract_addresses: Vec<Vec<u8>>,
    /// Opaque call payloads, one per call.
    #[serde_as(as = "Vec<Hex>")]
    pub payloads: Vec<Vec<u8>>,
}

impl ContractCallBatch {
    /// Empty batch.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append one call.
    pub fn with_call(mut self, dest: impl Into<Vec<u8>>, payload: impl Into<Vec<u8>>) -> Self {
        self.dest_contract_addresses.push(dest.into());
        self.payloads.push(payload.into());
        self
    }

    /// Number of calls, or an error when the two arrays disagree.
    pub fn checked_len(&self) -> Result<usize, TypeError> {
        if self.dest_contract_addresses.len() != self.payloads.len() {
            return Err(TypeError::BatchLengthMismatch {
                addresses: self.dest_contract_addresses.len(),
                payloads: self.payloads.len(),
            });
        }
        Ok(self.payloads.len())
    }

    /// True if the batch carries no calls.
    pub fn is_empty(&self) -> bool {
        self.dest_contract_addresses.is_empty() && self.payloads.is_empty()
    }

    /// Iterate `(address, payload)` pairs in order.
    pub fn calls(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.dest_contract_addresses
            .iter()
            .map(Vec::as_slice)
            .zip(self.payloads.iter().map(Vec::as_slice))
    }
}

// =============================================================================
// CLUSTER C: INBOUND
// =============================================================================

/// Origin of an inbound request: the calling contract and its chain.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceParams {
    /// Raw address of the caller on the source chain.
    #[serde_as(as = "Hex")]
    pub caller: Vec<u8>,
    /// Source chain family.
    pub chain_type: ChainType,
    /// Source chain id.
    pub chain_id: String,
}

impl SourceParams {
    /// Identity of the source chain.
    pub fn identity(&self) -> ChainIdentity {
        ChainIdentity::new(self.chain_type, self.chain_id.clone())
    }
}

/// Signed inbound request delivered by a relayer to `requestFromSource`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossTalkPayload {
    /// Relayer address on the routing chain (not covered by signatures).
    pub relayer_router_address: String,
    /// All-or-nothing execution when true.
    pub is_atomic: bool,
    /// Event identifier assigned by the routing chain.
    pub event_identifier: u64,
    /// Hard deadline (unix seconds).
    pub exp_timestamp: u64,
    /// Origin-side request nonce. Together with `source_params` forms the replay key.
    pub cross_talk_nonce: u64,
    /// Origin of the request.
    pub source_params: SourceParams,
    /// Calls to execute on this chain.
    pub contract_calls: ContractCallBatch,
    /// Execute without committing any state.
    #[serde(default)]
    pub is_read_call: bool,
    /// Acknowledgment policy echoed in the ack event.
    #[serde(default)]
    pub ack_type: AckType,
}

// =============================================================================
// CLUSTER D: ACKNOWLEDGMENT
// =============================================================================

/// Execution outcome relayed back to the origin chain's `crossTalkAck`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossTalkAckPayload {
    /// Nonce of the original request.
    pub cross_talk_nonce: u64,
    /// Event identifier of the original request.
    pub event_identifier: u64,
    /// Family of the chain that executed the batch.
    pub dest_chain_type: ChainType,
    /// Id of the chain that executed the batch.
    pub dest_chain_id: String,
    /// Contract on this chain that issued the request.
    #[serde_as(as = "Hex")]
    pub src_contract_address: Vec<u8>,
    /// Per-call success flags.
    pub exec_flags: Vec<bool>,
    /// Per-call return or revert data (single failure envelope for failed atomic batches).
    #[serde_as(as = "Vec<Hex>")]
    pub exec_data: Vec<Vec<u8>>,
}

impl CrossTalkAckPayload {
    /// Identity of the chain that executed the batch.
    pub fn dest_identity(&self) -> ChainIdentity {
        ChainIdentity::new(self.dest_chain_type, self.dest_chain_id.clone())
    }
}

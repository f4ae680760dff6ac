//! # Fee Table
//!
//! Flat per-request bridge fees keyed by acknowledgment mode and destination
//! chain id. A missing entry is distinct from a zero fee.

use super::errors::GatewayError;
use serde::{Deserialize, Serialize};
use shared_types::AckType;
use std::collections::BTreeMap;

/// One configured fee.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeEntry {
    /// Acknowledgment mode
    pub ack_type: AckType,
    /// Destination chain id
    pub dest_chain_id: String,
    /// Fee in native units
    pub amount: u128,
}

/// Route pricing for outbound requests.
#[derive(Clone, Debug, Default)]
pub struct FeeTable {
    fees: BTreeMap<(AckType, String), u128>,
}

impl FeeTable {
    /// Empty table: every route is unpriced.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or overwrite a fee.
    pub fn set_fee(&mut self, ack_type: AckType, dest_chain_id: impl Into<String>, amount: u128) {
        self.fees.insert((ack_type, dest_chain_id.into()), amount);
    }

    /// Fee for a route.
    pub fn quote(&self, ack_type: AckType, dest_chain_id: &str) -> Result<u128, GatewayError> {
        self.fees
            .get(&(ack_type, dest_chain_id.to_string()))
            .copied()
            .ok_or_else(|| GatewayError::FeeNotSet {
                ack_type,
                dest_chain_id: dest_chain_id.to_string(),
            })
    }

    /// Check that `provided` covers the fee for a route.
    ///
    /// Returns the fee. Any excess stays with the gateway.
    pub fn charge(
        &self,
        ack_type: AckType,
        dest_chain_id: &str,
        provided: u128,
    ) -> Result<u128, GatewayError> {
        let required = self.quote(ack_type, dest_chain_id)?;
        if provided < required {
            return Err(GatewayError::InsufficientFee { required, provided });
        }
        Ok(required)
    }

    /// All configured fees, ordered by route.
    pub fn entries(&self) -> Vec<FeeEntry> {
        self.fees
            .iter()
            .map(|((ack_type, dest_chain_id), amount)| FeeEntry {
                ack_type: *ack_type,
                dest_chain_id: dest_chain_id.clone(),
                amount: *amount,
            })
            .collect()
    }
}

impl FromIterator<FeeEntry> for FeeTable {
    fn from_iter<I: IntoIterator<Item = FeeEntry>>(iter: I) -> Self {
        let mut table = FeeTable::new();
        for entry in iter {
            table.set_fee(entry.ack_type, entry.dest_chain_id, entry.amount);
        }
        table
    }
}

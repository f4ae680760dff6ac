//! Gateway configuration, loaded from JSON at initialization.

use super::errors::GatewayError;
use super::fees::FeeEntry;
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_types::{Address, ChainIdentity, ChainType};
use xt_01_signature_verification::ValidatorSet;

fn default_min_total_power() -> u64 {
    1
}

/// Everything `initialize` needs.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// This chain's id
    pub chain_id: String,
    /// This chain's type
    pub chain_type: ChainType,
    /// Account allowed to set fees and withdraw them
    #[serde_as(as = "Hex")]
    pub owner: Address,
    /// Genesis validator addresses
    #[serde_as(as = "Vec<Hex>")]
    pub validators: Vec<Address>,
    /// Genesis validator powers
    pub powers: Vec<u32>,
    /// Genesis validator-set nonce
    pub valset_nonce: u64,
    /// Lowest total power a validator set may carry
    #[serde(default = "default_min_total_power")]
    pub min_total_power: u64,
    /// Fees installed at initialization
    #[serde(default)]
    pub fees: Vec<FeeEntry>,
}

impl GatewayConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, GatewayError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| GatewayError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// This chain's identity.
    pub fn identity(&self) -> ChainIdentity {
        ChainIdentity::new(self.chain_type, self.chain_id.clone())
    }

    /// The genesis validator set.
    pub fn genesis_valset(&self) -> ValidatorSet {
        ValidatorSet {
            validators: self.validators.clone(),
            powers: self.powers.clone(),
            valset_nonce: self.valset_nonce,
        }
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.chain_id.is_empty() {
            return Err(GatewayError::InvalidConfig("chain_id is empty".into()));
        }
        if self.owner == [0u8; 20] {
            return Err(GatewayError::InvalidConfig("owner is the zero address".into()));
        }
        self.genesis_valset()
            .validate(self.min_total_power)
            .map_err(|e| GatewayError::InvalidConfig(e.to_string()))
    }
}

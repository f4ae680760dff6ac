//! # Domain Entities
//!
//! Signatures and the weighted validator roster they are checked against.

use super::errors::VerificationError;
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_types::Address;

// =============================================================================
// ECDSA Types (secp256k1)
// =============================================================================

/// ECDSA signature on the secp256k1 curve.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// R component (32 bytes)
    #[serde_as(as = "Hex")]
    pub r: [u8; 32],
    /// S component (32 bytes)
    #[serde_as(as = "Hex")]
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

impl EcdsaSignature {
    /// Split a 65-byte `r || s || v` signature.
    pub fn from_rsv(bytes: &[u8; 65]) -> Self {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Self { r, s, v: bytes[64] }
    }

    /// Concatenate into `r || s || v`.
    pub fn to_rsv(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }
}

// =============================================================================
// Validator Set
// =============================================================================

/// Weighted signer roster at one epoch.
///
/// `validators[i]` carries `powers[i]`. The nonce increases with every
/// update and is part of the signed checkpoint.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSet {
    /// Validator addresses
    #[serde_as(as = "Vec<Hex>")]
    pub validators: Vec<Address>,
    /// Voting power per validator
    pub powers: Vec<u32>,
    /// Epoch nonce
    pub valset_nonce: u64,
}

impl ValidatorSet {
    /// Create a set and check its shape.
    pub fn new(
        validators: Vec<Address>,
        powers: Vec<u32>,
        valset_nonce: u64,
    ) -> Result<Self, VerificationError> {
        let set = Self {
            validators,
            powers,
            valset_nonce,
        };
        set.validate(1)?;
        Ok(set)
    }

    /// Check the roster shape.
    ///
    /// Lengths must match and the roster must be non-empty. Addresses are
    /// non-zero and strictly ascending, which also rules out repeats. The
    /// total power must reach `min_total_power`.
    pub fn validate(&self, min_total_power: u64) -> Result<(), VerificationError> {
        if self.validators.len() != self.powers.len() {
            return Err(VerificationError::MalformedValidatorSet(format!(
                "{} validators but {} powers",
                self.validators.len(),
                self.powers.len()
            )));
        }
        if self.validators.is_empty() {
            return Err(VerificationError::MalformedValidatorSet(
                "empty validator set".into(),
            ));
        }
        if self.validators.iter().any(|v| *v == [0u8; 20]) {
            return Err(VerificationError::MalformedValidatorSet(
                "zero validator address".into(),
            ));
        }
        for (i, pair) in self.validators.windows(2).enumerate() {
            if pair[0] == pair[1] {
                return Err(VerificationError::MalformedValidatorSet(
                    "duplicate validator address".into(),
                ));
            }
            if pair[0] > pair[1] {
                return Err(VerificationError::MalformedValidatorSet(format!(
                    "validator {} not above its predecessor",
                    i + 1
                )));
            }
        }
        let total = self.total_power();
        if total == 0 || total < min_total_power {
            return Err(VerificationError::MalformedValidatorSet(format!(
                "total power {} below minimum {}",
                total,
                min_total_power.max(1)
            )));
        }
        Ok(())
    }

    /// Sum of all powers.
    pub fn total_power(&self) -> u64 {
        self.powers.iter().map(|p| u64::from(*p)).sum()
    }

    /// Power of a member, `None` for non-members.
    pub fn power_of(&self, address: &Address) -> Option<u32> {
        self.validators
            .iter()
            .position(|v| v == address)
            .and_then(|i| self.powers.get(i).copied())
    }

    /// Number of validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// True if the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

/// `accumulated` is at least two thirds of `total`.
pub fn has_quorum(accumulated: u64, total: u64) -> bool {
    u128::from(accumulated) * 3 >= u128::from(total) * 2
}

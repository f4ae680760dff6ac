//! # Validator-Set Registry
//!
//! Holds the active validator set and its checkpoint. Submissions must
//! present the stored set verbatim; anything else is stale.

use super::checkpoint::checkpoint;
use super::entities::{EcdsaSignature, ValidatorSet};
use super::errors::VerificationError;
use crate::ports::inbound::SignatureVerificationApi;
use shared_types::Hash;

/// The active validator set of one gateway.
#[derive(Debug, Clone)]
pub struct ValidatorSetRegistry {
    current: ValidatorSet,
    checkpoint: Hash,
    min_total_power: u64,
}

impl ValidatorSetRegistry {
    /// Install the genesis set.
    pub fn new(genesis: ValidatorSet, min_total_power: u64) -> Result<Self, VerificationError> {
        genesis.validate(min_total_power)?;
        let checkpoint = checkpoint(&genesis);
        Ok(Self {
            current: genesis,
            checkpoint,
            min_total_power,
        })
    }

    /// The active set.
    pub fn current(&self) -> &ValidatorSet {
        &self.current
    }

    /// Checkpoint of the active set.
    pub fn checkpoint(&self) -> Hash {
        self.checkpoint
    }

    /// Epoch nonce of the active set.
    pub fn valset_nonce(&self) -> u64 {
        self.current.valset_nonce
    }

    /// Minimum total power accepted for a new set.
    pub fn min_total_power(&self) -> u64 {
        self.min_total_power
    }

    /// Reject a supplied set unless it is exactly the active one.
    pub fn ensure_current(&self, supplied: &ValidatorSet) -> Result<(), VerificationError> {
        if supplied.valset_nonce != self.current.valset_nonce {
            return Err(VerificationError::StaleValidatorSet {
                expected: self.current.valset_nonce,
                supplied: supplied.valset_nonce,
            });
        }
        if checkpoint(supplied) != self.checkpoint {
            return Err(VerificationError::ValidatorSetMismatch {
                nonce: supplied.valset_nonce,
            });
        }
        Ok(())
    }

    /// Validate a proposed successor and return its checkpoint.
    ///
    /// Does not install it; the caller verifies the current validators'
    /// signatures over the returned hash first.
    pub fn check_successor(&self, proposed: &ValidatorSet) -> Result<Hash, VerificationError> {
        proposed.validate(self.min_total_power)?;
        if proposed.valset_nonce <= self.current.valset_nonce {
            return Err(VerificationError::NonceNotIncreasing {
                current: self.current.valset_nonce,
                proposed: proposed.valset_nonce,
            });
        }
        Ok(checkpoint(proposed))
    }

    /// Replace the active set.
    pub fn install(&mut self, next: ValidatorSet) {
        self.checkpoint = checkpoint(&next);
        self.current = next;
    }

    /// Hand over to `next` if the active validators signed its checkpoint.
    ///
    /// `supplied_current` must be the active set. Nothing changes on error.
    pub fn apply_update<V: SignatureVerificationApi + ?Sized>(
        &mut self,
        supplied_current: &ValidatorSet,
        next: ValidatorSet,
        signatures: &[EcdsaSignature],
        verifier: &V,
    ) -> Result<u64, VerificationError> {
        self.ensure_current(supplied_current)?;
        let next_checkpoint = self.check_successor(&next)?;
        let power = verifier.verify_quorum(&self.current, signatures, &next_checkpoint)?;
        self.current = next;
        self.checkpoint = next_checkpoint;
        Ok(power)
    }
}

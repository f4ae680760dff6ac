//! # Quorum Verification
//!
//! Checks a signature array against a validator set and the two-thirds
//! power threshold.
//!
//! Signers must appear in strictly ascending address order. Comparing each
//! recovered address with its predecessor rejects duplicates in O(n) with no
//! auxiliary set.

use super::ecdsa::{eth_signed_message_hash, recover_prehash};
use super::entities::{has_quorum, EcdsaSignature, ValidatorSet};
use super::errors::{SignatureError, VerificationError};
use rayon::prelude::*;
use shared_types::{Address, Hash};

/// Below this many signatures, recovery runs on the calling thread.
const PARALLEL_RECOVERY_THRESHOLD: usize = 4;

/// Stateless quorum verifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureVerifier;

impl SignatureVerifier {
    /// Create a verifier.
    pub fn new() -> Self {
        Self
    }

    /// Verify `signatures` over `message_hash` against `set`.
    ///
    /// Each signature is a personal-message (EIP-191) signature. Returns the
    /// accumulated power of the signers. Fails with:
    /// - `InvalidSignature` if a signature does not recover, or recovers to a non-member
    /// - `DuplicateOrUnordered` if recovered addresses are not strictly ascending
    /// - `InsufficientPower` if the signers hold less than two thirds of the total
    pub fn verify(
        &self,
        set: &ValidatorSet,
        signatures: &[EcdsaSignature],
        message_hash: &Hash,
    ) -> Result<u64, VerificationError> {
        let signers = recover_all(signatures, message_hash);
        let total = set.total_power();

        let mut accumulated: u64 = 0;
        let mut previous: Option<Address> = None;

        for (index, signer) in signers.into_iter().enumerate() {
            let signer = signer.map_err(|cause| VerificationError::InvalidSignature { index, cause })?;

            if previous.is_some_and(|prev| signer <= prev) {
                return Err(VerificationError::DuplicateOrUnordered { index });
            }

            let power = set
                .power_of(&signer)
                .ok_or(VerificationError::InvalidSignature {
                    index,
                    cause: SignatureError::UnknownSigner(signer),
                })?;

            accumulated = accumulated.saturating_add(u64::from(power));
            previous = Some(signer);
        }

        if !has_quorum(accumulated, total) {
            return Err(VerificationError::InsufficientPower { accumulated, total });
        }
        Ok(accumulated)
    }
}

/// Recover every signer, in input order.
pub fn recover_all(
    signatures: &[EcdsaSignature],
    message_hash: &Hash,
) -> Vec<Result<Address, SignatureError>> {
    let digest = eth_signed_message_hash(message_hash);
    if signatures.len() < PARALLEL_RECOVERY_THRESHOLD {
        return signatures.iter().map(|s| recover_prehash(&digest, s)).collect();
    }
    signatures
        .par_iter()
        .map(|s| recover_prehash(&digest, s))
        .collect()
}

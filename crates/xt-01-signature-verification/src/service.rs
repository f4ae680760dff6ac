//! # Signature Verification Service
//!
//! Implements `SignatureVerificationApi` on top of the domain layer and
//! records verification latency and rejections.

use crate::domain::checkpoint;
use crate::domain::ecdsa;
use crate::domain::entities::{EcdsaSignature, ValidatorSet};
use crate::domain::errors::{SignatureError, VerificationError};
use crate::domain::quorum::SignatureVerifier;
use crate::ports::inbound::SignatureVerificationApi;
use shared_types::{Address, Hash};
use tracing::{debug, warn};
use xt_telemetry::{metric_inc, HistogramTimer, VERIFICATION_DURATION, VERIFICATION_FAILURES};

/// Signature Verification Service.
#[derive(Debug, Clone, Default)]
pub struct SignatureVerificationService {
    verifier: SignatureVerifier,
}

impl SignatureVerificationService {
    /// Create a new signature verification service.
    pub fn new() -> Self {
        Self {
            verifier: SignatureVerifier::new(),
        }
    }
}

impl SignatureVerificationApi for SignatureVerificationService {
    fn recover_signer(
        &self,
        message_hash: &Hash,
        signature: &EcdsaSignature,
    ) -> Result<Address, SignatureError> {
        ecdsa::recover_signer(message_hash, signature)
    }

    fn verify_quorum(
        &self,
        set: &ValidatorSet,
        signatures: &[EcdsaSignature],
        message_hash: &Hash,
    ) -> Result<u64, VerificationError> {
        let _timer = HistogramTimer::new(&VERIFICATION_DURATION);

        match self.verifier.verify(set, signatures, message_hash) {
            Ok(power) => {
                debug!(
                    "[xt-01] quorum reached: {} signatures, power {}/{}",
                    signatures.len(),
                    power,
                    set.total_power()
                );
                Ok(power)
            }
            Err(e) => {
                warn!("[xt-01] quorum rejected: {}", e);
                metric_inc!(VERIFICATION_FAILURES, &[e.reason()]);
                Err(e)
            }
        }
    }

    fn checkpoint(&self, set: &ValidatorSet) -> Hash {
        checkpoint::checkpoint(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ecdsa::keccak256;
    use crate::domain::ecdsa::test_helpers::*;

    #[test]
    fn test_service_as_trait_object() {
        let service: Box<dyn SignatureVerificationApi> = Box::new(SignatureVerificationService::new());
        let vals = sorted_validators(2);
        let set = validator_set(&vals, &[1, 1], 1);
        let hash = keccak256(b"payload");
        let sigs = sign_all(&[&vals[0], &vals[1]], &hash);

        assert_eq!(service.verify_quorum(&set, &sigs, &hash), Ok(2));
        assert_eq!(service.recover_signer(&hash, &sigs[1]), Ok(vals[1].address));
        assert_eq!(service.checkpoint(&set), checkpoint::checkpoint(&set));
    }

    #[test]
    fn test_rejection_is_counted() {
        let service = SignatureVerificationService::new();
        let vals = sorted_validators(3);
        let set = validator_set(&vals, &[1, 1, 1], 1);
        let hash = keccak256(b"payload");
        let sigs = sign_all(&[&vals[0]], &hash);

        let before = VERIFICATION_FAILURES
            .with_label_values(&["insufficient_power"])
            .get();
        assert!(service.verify_quorum(&set, &sigs, &hash).is_err());
        let after = VERIFICATION_FAILURES
            .with_label_values(&["insufficient_power"])
            .get();
        assert!(after > before);
    }
}

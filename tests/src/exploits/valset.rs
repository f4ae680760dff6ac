//! # Validator-Set Capture
//!
//! Whoever controls the validator set controls the gateway. These attacks
//! try to install an attacker roster without the current quorum.

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use xt_01_signature_verification::{checkpoint, VerificationError};
    use xt_02_gateway::test_helpers::{TestValidators, DEST_CHAIN_ID};
    use xt_02_gateway::GatewayError;

    #[test]
    fn test_self_signed_roster_rejected() {
        let validators = TestValidators::new(3);
        let mut gateway = gateway(&validators, DEST_CHAIN_ID);
        let attacker = validators.successor(&[1000]);
        let signatures = attacker.sign(&checkpoint(&attacker.valset()));

        assert!(gateway
            .update_valset(&validators.valset(), attacker.valset(), &signatures)
            .is_err());
        assert_eq!(gateway.valset(), &validators.valset());
    }

    #[test]
    fn test_minority_cannot_rotate() {
        let validators = TestValidators::new(3);
        let mut gateway = gateway(&validators, DEST_CHAIN_ID);
        let attacker = validators.successor(&[1000]);
        let signatures = validators.sign_by(&[0], &checkpoint(&attacker.valset()));

        let err = gateway
            .update_valset(&validators.valset(), attacker.valset(), &signatures)
            .unwrap_err();
        assert_eq!(
            err,
            GatewayError::Verification(VerificationError::InsufficientPower {
                accumulated: 100,
                total: 300,
            })
        );
    }

    #[test]
    fn test_claimed_current_set_must_match_checkpoint() {
        let validators = TestValidators::new(3);
        let mut gateway = gateway(&validators, DEST_CHAIN_ID);
        let impostor = TestValidators::new(3);
        let attacker = validators.successor(&[1000]);
        let signatures = impostor.sign(&checkpoint(&attacker.valset()));

        let err = gateway
            .update_valset(&impostor.valset(), attacker.valset(), &signatures)
            .unwrap_err();
        assert_eq!(
            err,
            GatewayError::Verification(VerificationError::ValidatorSetMismatch { nonce: 1 })
        );
    }

    #[test]
    fn test_signed_rotation_cannot_be_replayed() {
        let validators = TestValidators::new(3);
        let mut gateway = gateway(&validators, DEST_CHAIN_ID);
        let next = validators.successor(&[50, 50]);
        let signatures = validators.sign(&checkpoint(&next.valset()));
        gateway
            .update_valset(&validators.valset(), next.valset(), &signatures)
            .unwrap();

        let err = gateway
            .update_valset(&validators.valset(), next.valset(), &signatures)
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Verification(VerificationError::StaleValidatorSet { .. })
        ));
    }

    #[test]
    fn test_rotation_must_advance_nonce() {
        let validators = TestValidators::new(3);
        let mut gateway = gateway(&validators, DEST_CHAIN_ID);
        let mut same_epoch = validators.successor(&[50, 50]).valset();
        same_epoch.valset_nonce = 1;
        let signatures = validators.sign(&checkpoint(&same_epoch));

        let err = gateway
            .update_valset(&validators.valset(), same_epoch, &signatures)
            .unwrap_err();
        assert_eq!(
            err,
            GatewayError::Verification(VerificationError::NonceNotIncreasing {
                current: 1,
                proposed: 1,
            })
        );
    }

    #[test]
    fn test_powerless_roster_rejected() {
        let validators = TestValidators::new(3);
        let mut gateway = gateway(&validators, DEST_CHAIN_ID);
        let empty = validators.successor(&[0, 0]).valset();
        let signatures = validators.sign(&checkpoint(&empty));

        let err = gateway
            .update_valset(&validators.valset(), empty, &signatures)
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Verification(VerificationError::MalformedValidatorSet(_))
        ));
        assert_eq!(gateway.valset(), &validators.valset());
    }
}

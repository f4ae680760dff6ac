//! # Signature Attacks
//!
//! - **Malleability**: flipping a valid signature to its high-S twin
//! - **Power inflation**: one validator's signature submitted several times
//! - **Reordering**: valid signatures in descending signer order
//! - **Forgery**: a full quorum from keys outside the validator set
//! - **Payload tampering**: editing calls after the validators signed

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use xt_01_signature_verification::domain::ecdsa::invert_s;
    use xt_01_signature_verification::VerificationError;
    use xt_02_gateway::test_helpers::{
        greeting_payload, TestValidators, DEST_CHAIN_ID, GREETING_KEY,
    };
    use xt_02_gateway::{request_from_source_hash, GatewayError};

    #[test]
    fn test_high_s_twin_rejected() {
        let validators = TestValidators::new(1);
        let mut gateway = gateway(&validators, DEST_CHAIN_ID);
        let payload = greeting_request("malleable");
        let mut signatures = validators.sign_request(&payload, gateway.identity());
        let sig = &mut signatures[0];
        sig.s = invert_s(&sig.s);
        sig.v ^= 1;

        let err = gateway
            .request_from_source(&relayer(), &validators.valset(), &signatures, &payload)
            .unwrap_err();

        assert!(matches!(
            err,
            GatewayError::Verification(VerificationError::InvalidSignature { index: 0, .. })
        ));
        assert!(!gateway.nonces().is_consumed(&payload.source_params, payload.cross_talk_nonce));
    }

    #[test]
    fn test_repeated_signature_does_not_add_power() {
        let validators = TestValidators::new(3);
        let mut gateway = gateway(&validators, DEST_CHAIN_ID);
        let payload = greeting_request("inflated");
        let hash = request_from_source_hash(&payload, gateway.identity());
        let signatures = validators.sign_by(&[0, 0, 0], &hash);

        let err = gateway
            .request_from_source(&relayer(), &validators.valset(), &signatures, &payload)
            .unwrap_err();

        assert_eq!(
            err,
            GatewayError::Verification(VerificationError::DuplicateOrUnordered { index: 1 })
        );
    }

    #[test]
    fn test_descending_order_rejected() {
        let validators = TestValidators::new(3);
        let mut gateway = gateway(&validators, DEST_CHAIN_ID);
        let payload = greeting_request("reordered");
        let hash = request_from_source_hash(&payload, gateway.identity());
        let signatures = validators.sign_by(&[2, 1, 0], &hash);

        let err = gateway
            .request_from_source(&relayer(), &validators.valset(), &signatures, &payload)
            .unwrap_err();

        assert!(matches!(
            err,
            GatewayError::Verification(VerificationError::DuplicateOrUnordered { .. })
        ));
    }

    #[test]
    fn test_outsider_quorum_rejected() {
        let validators = TestValidators::new(3);
        let outsiders = TestValidators::new(3);
        let mut gateway = gateway(&validators, DEST_CHAIN_ID);
        let payload = greeting_request("forged");
        let signatures = outsiders.sign_request(&payload, gateway.identity());

        // Presented against the real roster.
        let err = gateway
            .request_from_source(&relayer(), &validators.valset(), &signatures, &payload)
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Verification(VerificationError::InvalidSignature { .. })
        ));

        // Presented alongside the outsiders' own roster.
        let err = gateway
            .request_from_source(&relayer(), &outsiders.valset(), &signatures, &payload)
            .unwrap_err();
        assert_eq!(
            err,
            GatewayError::Verification(VerificationError::ValidatorSetMismatch { nonce: 1 })
        );
        assert_eq!(gateway.storage_value(&HELLO, GREETING_KEY), None);
    }

    #[test]
    fn test_tampered_calls_rejected() {
        let validators = TestValidators::new(3);
        let mut gateway = gateway(&validators, DEST_CHAIN_ID);
        let mut payload = greeting_request("benign");
        let signatures = validators.sign_request(&payload, gateway.identity());
        payload.contract_calls.payloads[0] = greeting_payload("malicious");

        let err = gateway
            .request_from_source(&relayer(), &validators.valset(), &signatures, &payload)
            .unwrap_err();

        assert!(matches!(err, GatewayError::Verification(_)));
        assert_eq!(gateway.storage_value(&HELLO, GREETING_KEY), None);
    }

    #[test]
    fn test_relayer_address_is_not_attested() {
        let validators = TestValidators::new(3);
        let mut gateway = gateway(&validators, DEST_CHAIN_ID);
        let mut payload = greeting_request("benign");
        let signatures = validators.sign_request(&payload, gateway.identity());
        payload.relayer_router_address = "router1thief".into();

        // Only the reward address changes; execution is unaffected.
        let event = gateway
            .request_from_source(&relayer(), &validators.valset(), &signatures, &payload)
            .unwrap();
        assert_eq!(event.relayer_router_address, "router1thief");
        assert_eq!(gateway.storage_value(&HELLO, GREETING_KEY), Some(b"benign".to_vec()));
    }
}

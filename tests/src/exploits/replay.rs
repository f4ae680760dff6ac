//! # Replay Attacks
//!
//! - **Nonce replay**: the same signed batch submitted twice
//! - **Replay after rotation**: a new validator set re-attests an executed batch
//! - **Cross-chain replay**: an attestation for one gateway presented to another
//!   governed by the same validators

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use xt_01_signature_verification::checkpoint;
    use xt_02_gateway::test_helpers::{TestValidators, DEST_CHAIN_ID, GREETING_KEY};
    use xt_02_gateway::GatewayError;

    #[test]
    fn test_resubmitted_batch_rejected() {
        let validators = TestValidators::new(4);
        let mut gateway = gateway(&validators, DEST_CHAIN_ID);
        let payload = greeting_request("once");
        let signatures = validators.sign_request(&payload, gateway.identity());

        gateway
            .request_from_source(&relayer(), &validators.valset(), &signatures, &payload)
            .unwrap();
        let nonce_after_first = gateway.nonces().event_nonce();

        for _ in 0..3 {
            let err = gateway
                .request_from_source(&relayer(), &validators.valset(), &signatures, &payload)
                .unwrap_err();
            assert!(matches!(err, GatewayError::ReplayedRequest { .. }));
        }
        assert_eq!(gateway.nonces().event_nonce(), nonce_after_first);
    }

    #[test]
    fn test_replay_survives_valset_rotation() {
        let validators = TestValidators::new(4);
        let mut gateway = gateway(&validators, DEST_CHAIN_ID);
        let payload = greeting_request("once");
        let signatures = validators.sign_request(&payload, gateway.identity());
        gateway
            .request_from_source(&relayer(), &validators.valset(), &signatures, &payload)
            .unwrap();

        let next = validators.successor(&[10, 10, 10]);
        let rotation = validators.sign(&checkpoint(&next.valset()));
        gateway
            .update_valset(&validators.valset(), next.valset(), &rotation)
            .unwrap();

        let fresh = next.sign_request(&payload, gateway.identity());
        let err = gateway
            .request_from_source(&relayer(), &next.valset(), &fresh, &payload)
            .unwrap_err();
        assert!(matches!(err, GatewayError::ReplayedRequest { .. }));
    }

    #[test]
    fn test_attestation_bound_to_destination_chain() {
        let validators = TestValidators::new(4);
        let mut target = gateway(&validators, DEST_CHAIN_ID);
        let mut sibling = gateway(&validators, "3");
        let payload = greeting_request("hijack");
        let signatures = validators.sign_request(&payload, target.identity());

        let err = sibling
            .request_from_source(&relayer(), &validators.valset(), &signatures, &payload)
            .unwrap_err();
        assert!(matches!(err, GatewayError::Verification(_)));
        assert_eq!(sibling.storage_value(&HELLO, GREETING_KEY), None);

        // The intended gateway still accepts it.
        target
            .request_from_source(&relayer(), &validators.valset(), &signatures, &payload)
            .unwrap();
    }

    #[test]
    fn test_same_nonce_from_different_sources_is_not_replay() {
        let validators = TestValidators::new(4);
        let mut gateway = gateway(&validators, DEST_CHAIN_ID);
        let first = greeting_request("from chain 1");
        let mut second = greeting_request("from chain 5");
        second.source_params.chain_id = "5".into();
        assert_eq!(first.cross_talk_nonce, second.cross_talk_nonce);

        for payload in [&first, &second] {
            let signatures = validators.sign_request(payload, gateway.identity());
            gateway
                .request_from_source(&relayer(), &validators.valset(), &signatures, payload)
                .unwrap();
        }
        assert_eq!(
            gateway.storage_value(&HELLO, GREETING_KEY),
            Some(b"from chain 5".to_vec())
        );
    }
}

//! # Round-Trip Flows
//!
//! ```text
//! [App on chain 1] ──requestToDest──→ [Gateway 1] ──RequestToDest──→ relayer
//!                                                                      │
//! [Gateway 1] ←──crossTalkAck── relayer ←──CrossTalkAck── [Gateway 2] ←┘
//!      │                                                       │
//!      ↓                                                       ↓
//! app ack handler                                     GreetingHandler
//! ```
//!
//! ## Test Categories
//!
//! 1. **Happy Path**: request executes, ack returns and is recorded once
//! 2. **Failure Reporting**: atomic rollback travels back in the ack
//! 3. **Ordering**: identifiers per destination, out-of-order delivery
//! 4. **Concurrency**: many senders against one gateway

#[cfg(test)]
mod tests {
    use super::super::relayer::{TestChain, TestRelayer};
    use shared_bus::{EventFilter, EventTopic, GatewayEvent};
    use shared_types::{ContractCallBatch, RequestToDestEvent};
    use std::sync::Arc;
    use std::time::Duration;
    use xt_02_gateway::test_helpers::{
        greeting_payload, outbound_request, GreetingHandler, CHAIN_ID, DEST_CHAIN_ID,
        GREETING_KEY, LAST_ACK_KEY, NOW,
    };
    use xt_02_gateway::{
        decode_atomic_failure, decode_revert_message, AckOutcome, GatewayApi, GatewayError,
        OutboundRequest, TxContext,
    };

    const HELLO: [u8; 20] = [0xaa; 20];
    const APP: [u8; 20] = [0x11; 20];
    const WAIT: Duration = Duration::from_secs(1);

    async fn two_chains() -> (TestChain, TestChain) {
        let origin = TestChain::start(CHAIN_ID, 4).await;
        let dest = TestChain::start(DEST_CHAIN_ID, 4).await;
        origin
            .service
            .register_handler(APP.to_vec(), Arc::new(GreetingHandler))
            .await
            .unwrap();
        dest.service
            .register_handler(HELLO.to_vec(), Arc::new(GreetingHandler))
            .await
            .unwrap();
        (origin, dest)
    }

    async fn send(origin: &TestChain, request: OutboundRequest) -> RequestToDestEvent {
        let mut sub = origin
            .bus
            .subscribe(EventFilter::topics(vec![EventTopic::Outbound]));
        let returned = origin
            .service
            .request_to_dest(TxContext::new(APP, NOW).with_value(1000), request)
            .await
            .unwrap();
        match sub.recv_timeout(WAIT).await.unwrap() {
            GatewayEvent::RequestToDest(event) => {
                assert_eq!(event, returned);
                event
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    fn greeting_request(greetings: &[&str], is_atomic: bool) -> OutboundRequest {
        let mut request = outbound_request(DEST_CHAIN_ID);
        request.is_atomic = is_atomic;
        request.contract_calls = greetings.iter().fold(ContractCallBatch::empty(), |b, g| {
            b.with_call(HELLO.to_vec(), greeting_payload(g))
        });
        request
    }

    #[tokio::test]
    async fn test_request_executes_and_ack_returns() {
        let (origin, dest) = two_chains().await;
        let relayer = TestRelayer::default();
        let mut acks = dest.bus.subscribe(EventFilter::topics(vec![EventTopic::Ack]));

        let request = send(&origin, greeting_request(&["HelloString"], false)).await;
        assert_eq!(request.sender, format!("0x{}", hex::encode(APP)));

        let ack_event = relayer.forward_request(&request, &dest, NOW).await.unwrap();
        assert!(ack_event.success);
        assert_eq!(ack_event.exec_flags, vec![true]);
        assert_eq!(ack_event.src_chain, origin.identity());
        assert_eq!(dest.storage(&HELLO, GREETING_KEY), Some(b"HelloString".to_vec()));

        let published = acks.recv_timeout(WAIT).await.unwrap();
        assert_eq!(published, GatewayEvent::CrossTalkAck(ack_event.clone()));

        let outcome = relayer.return_ack(&ack_event, &origin, NOW).await.unwrap();
        assert_eq!(outcome, AckOutcome::Recorded);
        assert_eq!(
            origin.storage(&APP, LAST_ACK_KEY),
            Some(request.event_nonce.to_be_bytes().to_vec())
        );

        let again = relayer.return_ack(&ack_event, &origin, NOW).await.unwrap();
        assert_eq!(again, AckOutcome::AlreadyProcessed);
    }

    #[tokio::test]
    async fn test_atomic_failure_travels_back() {
        let (origin, dest) = two_chains().await;
        let relayer = TestRelayer::default();

        let request = send(&origin, greeting_request(&["first", ""], true)).await;
        let ack_event = relayer.forward_request(&request, &dest, NOW).await.unwrap();

        assert!(!ack_event.success);
        assert_eq!(ack_event.exec_flags, vec![false, false]);
        assert_eq!(dest.storage(&HELLO, GREETING_KEY), None);

        let failure = decode_atomic_failure(&ack_event.exec_payload).unwrap();
        assert_eq!(failure.failing_index(), Some(1));
        assert_eq!(
            failure.revert_data().and_then(decode_revert_message).as_deref(),
            Some("String should not be empty")
        );

        // The origin records failed outcomes like any other.
        let outcome = relayer.return_ack(&ack_event, &origin, NOW).await.unwrap();
        assert_eq!(outcome, AckOutcome::Recorded);
        let recorded = origin
            .service
            .read(|gw| gw.ack(ack_event.event_identifier, ack_event.cross_talk_nonce).cloned())
            .unwrap()
            .unwrap();
        assert_eq!(recorded.exec_flags, vec![false, false]);
    }

    #[tokio::test]
    async fn test_out_of_order_delivery() {
        let (origin, dest) = two_chains().await;
        let relayer = TestRelayer::default();

        let first = send(&origin, greeting_request(&["one"], false)).await;
        let second = send(&origin, greeting_request(&["two"], false)).await;
        assert_eq!(first.src_chain_params.request_identifier, 1);
        assert_eq!(second.src_chain_params.request_identifier, 2);
        assert_eq!(second.event_nonce, first.event_nonce + 1);

        relayer.forward_request(&second, &dest, NOW).await.unwrap();
        relayer.forward_request(&first, &dest, NOW).await.unwrap();
        assert_eq!(dest.storage(&HELLO, GREETING_KEY), Some(b"one".to_vec()));

        let replay = relayer.forward_request(&second, &dest, NOW).await;
        assert!(matches!(replay, Err(GatewayError::ReplayedRequest { .. })));
    }

    #[tokio::test]
    async fn test_late_delivery_rejected() {
        let (origin, dest) = two_chains().await;
        let relayer = TestRelayer::default();
        let request = send(&origin, greeting_request(&["late"], false)).await;

        let result = relayer.forward_request(&request, &dest, NOW + 1).await;

        assert!(matches!(result, Err(GatewayError::RequestExpired { .. })));
        assert_eq!(dest.storage(&HELLO, GREETING_KEY), None);
    }

    #[tokio::test]
    async fn test_concurrent_senders_get_unique_nonces() {
        let (origin, _dest) = two_chains().await;
        let tasks: Vec<_> = (0..16u8)
            .map(|i| {
                let service = origin.service.clone();
                tokio::spawn(async move {
                    service
                        .request_to_dest(
                            TxContext::new([i; 20], NOW).with_value(1000),
                            outbound_request(DEST_CHAIN_ID),
                        )
                        .await
                })
            })
            .collect();

        let mut nonces = Vec::new();
        let mut identifiers = Vec::new();
        for task in tasks {
            let event = task.await.unwrap().unwrap();
            nonces.push(event.event_nonce);
            identifiers.push(event.src_chain_params.request_identifier);
        }
        nonces.sort_unstable();
        identifiers.sort_unstable();

        assert_eq!(nonces, (2..=17).collect::<Vec<u64>>());
        assert_eq!(identifiers, (1..=16).collect::<Vec<u64>>());
        assert_eq!(origin.service.read(|gw| gw.fee_balance()), Ok(16_000));
    }
}

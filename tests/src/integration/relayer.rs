//! # Test Relayer
//!
//! Moves events between two gateways the way an off-chain relayer does:
//! turn the origin's `RequestToDest` into a `CrossTalkPayload`, collect the
//! destination validators' signatures, submit, then carry the resulting
//! `CrossTalkAck` back to the origin.

use shared_bus::InMemoryEventBus;
use shared_types::{
    Address, ChainIdentity, CrossTalkAckEvent, CrossTalkPayload, RequestToDestEvent, SourceParams,
};
use std::sync::Arc;
use xt_02_gateway::test_helpers::{TestValidators, RELAYER_ROUTER_ADDRESS};
use xt_02_gateway::{AckOutcome, GatewayApi, GatewayError, GatewayService, TxContext};

/// Service type every test chain runs.
pub type TestService = GatewayService<Arc<InMemoryEventBus>>;

/// One chain: its bus, its gateway service and the validators attesting for it.
pub struct TestChain {
    /// Events this chain's gateway emits
    pub bus: Arc<InMemoryEventBus>,
    /// The gateway
    pub service: Arc<TestService>,
    /// Validators signing messages addressed to this chain
    pub validators: TestValidators,
}

impl TestChain {
    /// Start a gateway for `chain_id` with `n` validators.
    pub async fn start(chain_id: &str, n: usize) -> Self {
        let bus = Arc::new(InMemoryEventBus::new());
        let service = Arc::new(GatewayService::new(bus.clone()));
        let validators = TestValidators::new(n);
        service
            .initialize(validators.config(chain_id))
            .await
            .expect("test chain config is valid");
        Self {
            bus,
            service,
            validators,
        }
    }

    /// This chain's identity.
    pub fn identity(&self) -> ChainIdentity {
        self.service
            .read(|gw| gw.identity().clone())
            .expect("test chain is initialized")
    }

    /// Committed storage slot of a handler.
    pub fn storage(&self, contract: &[u8], key: &[u8]) -> Option<Vec<u8>> {
        self.service
            .read(|gw| gw.storage_value(contract, key))
            .expect("test chain is initialized")
    }
}

/// Relayer with its own submitting account.
pub struct TestRelayer {
    /// Account submitting transactions
    pub account: Address,
    /// Reward address echoed in acknowledgments
    pub router_address: String,
}

impl Default for TestRelayer {
    fn default() -> Self {
        Self {
            account: [0x7e; 20],
            router_address: RELAYER_ROUTER_ADDRESS.to_string(),
        }
    }
}

impl TestRelayer {
    /// Inbound payload for an outbound request.
    ///
    /// The request's per-destination identifier becomes the event identifier
    /// and its event nonce becomes the crossTalk nonce. The caller-supplied
    /// timestamp is the expiry.
    pub fn inbound_payload(&self, request: &RequestToDestEvent) -> CrossTalkPayload {
        let src = &request.src_chain_params;
        CrossTalkPayload {
            relayer_router_address: self.router_address.clone(),
            is_atomic: src.is_atomic,
            event_identifier: src.request_identifier,
            exp_timestamp: src.timestamp,
            cross_talk_nonce: request.event_nonce,
            source_params: SourceParams {
                caller: request.caller.to_vec(),
                chain_type: src.src_chain_type,
                chain_id: src.src_chain_id.clone(),
            },
            contract_calls: request.contract_calls.clone(),
            is_read_call: request.is_read_call,
            ack_type: request.ack_type,
        }
    }

    /// Deliver `request` to `dest` at `block_timestamp`.
    pub async fn forward_request(
        &self,
        request: &RequestToDestEvent,
        dest: &TestChain,
        block_timestamp: u64,
    ) -> Result<CrossTalkAckEvent, GatewayError> {
        let payload = self.inbound_payload(request);
        self.submit_payload(payload, dest, block_timestamp).await
    }

    /// Sign `payload` with `dest`'s validators and submit it.
    pub async fn submit_payload(
        &self,
        payload: CrossTalkPayload,
        dest: &TestChain,
        block_timestamp: u64,
    ) -> Result<CrossTalkAckEvent, GatewayError> {
        let signatures = dest.validators.sign_request(&payload, &dest.identity());
        dest.service
            .request_from_source(
                TxContext::new(self.account, block_timestamp),
                dest.validators.valset(),
                signatures,
                payload,
            )
            .await
    }

    /// Carry an acknowledgment back to `origin`.
    pub async fn return_ack(
        &self,
        ack_event: &CrossTalkAckEvent,
        origin: &TestChain,
        block_timestamp: u64,
    ) -> Result<AckOutcome, GatewayError> {
        let ack = ack_event.to_ack_payload();
        let signatures = origin.validators.sign_ack(&ack, &origin.identity());
        origin
            .service
            .cross_talk_ack(
                TxContext::new(self.account, block_timestamp),
                origin.validators.valset(),
                signatures,
                ack,
            )
            .await
    }
}

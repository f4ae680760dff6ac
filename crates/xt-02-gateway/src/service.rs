//! # Gateway Service
//!
//! Implements `GatewayApi` over a single `Gateway`.
//!
//! ## Concurrency
//!
//! The gateway sits behind a `parking_lot::RwLock`. Every mutating operation
//! holds the write lock for its whole check-then-apply sequence, so one chain
//! has exactly one writer at a time. Events are published to the bus after
//! the lock is released.

use crate::domain::{AckOutcome, GatewayConfig, GatewayError, OutboundRequest, TxContext};
use crate::gateway::Gateway;
use crate::ports::inbound::GatewayApi;
use crate::ports::outbound::CrossTalkHandler;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_bus::{EventPublisher, GatewayEvent};
use shared_types::{
    AckType, CrossTalkAckEvent, CrossTalkAckPayload, CrossTalkPayload, RequestToDestEvent,
    ValsetUpdatedEvent,
};
use std::sync::Arc;
use tracing::warn;
use xt_01_signature_verification::{
    EcdsaSignature, SignatureVerificationApi, SignatureVerificationService, ValidatorSet,
    VerificationError,
};
use xt_telemetry::{
    metric_inc, register_metrics, ACKS_PROCESSED, BATCH_CALL_FAILURES, REQUESTS_FROM_SOURCE, REQUESTS_TO_DEST,
    VALSET_UPDATES, VERIFICATION_FAILURES,
};

/// Gateway service.
pub struct GatewayService<P: EventPublisher> {
    gateway: RwLock<Option<Gateway>>,
    verifier: Arc<dyn SignatureVerificationApi>,
    publisher: P,
}

impl<P: EventPublisher> GatewayService<P> {
    /// Create an uninitialized service publishing to `publisher`.
    pub fn new(publisher: P) -> Self {
        Self::with_verifier(publisher, Arc::new(SignatureVerificationService::new()))
    }

    /// Create a service with a custom verification backend.
    pub fn with_verifier(publisher: P, verifier: Arc<dyn SignatureVerificationApi>) -> Self {
        if let Err(e) = register_metrics() {
            warn!("[xt-02] metrics unavailable: {}", e);
        }
        Self {
            gateway: RwLock::new(None),
            verifier,
            publisher,
        }
    }

    /// The event publisher.
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Run `f` against the gateway.
    pub fn read<T>(&self, f: impl FnOnce(&Gateway) -> T) -> Result<T, GatewayError> {
        let guard = self.gateway.read();
        let gateway = guard.as_ref().ok_or(GatewayError::NotInitialized)?;
        Ok(f(gateway))
    }

    fn write<T>(
        &self,
        f: impl FnOnce(&mut Gateway) -> Result<T, GatewayError>,
    ) -> Result<T, GatewayError> {
        let mut guard = self.gateway.write();
        let gateway = guard.as_mut().ok_or(GatewayError::NotInitialized)?;
        f(gateway)
    }

    fn rejected(&self, operation: &str, err: &GatewayError) {
        warn!(operation, reason = err.reason(), "[xt-02] rejected: {}", err);
        // Quorum failures are counted by the verifier itself.
        let counted = matches!(
            err,
            GatewayError::Verification(
                VerificationError::InvalidSignature { .. }
                    | VerificationError::DuplicateOrUnordered { .. }
                    | VerificationError::InsufficientPower { .. }
            )
        );
        if !counted {
            metric_inc!(VERIFICATION_FAILURES, &[err.reason()]);
        }
    }
}

#[async_trait]
impl<P: EventPublisher + 'static> GatewayApi for GatewayService<P> {
    async fn initialize(&self, config: GatewayConfig) -> Result<ValsetUpdatedEvent, GatewayError> {
        let event = {
            let mut guard = self.gateway.write();
            if guard.is_some() {
                return Err(GatewayError::AlreadyInitialized);
            }
            let (gateway, event) = Gateway::initialize_with_verifier(config, self.verifier.clone())?;
            *guard = Some(gateway);
            event
        };
        self.publisher
            .publish(GatewayEvent::ValsetUpdated(event.clone()))
            .await;
        Ok(event)
    }

    async fn set_bridge_fees(
        &self,
        ctx: TxContext,
        ack_type: AckType,
        dest_chain_id: String,
        amount: u128,
    ) -> Result<(), GatewayError> {
        self.write(|gw| gw.set_bridge_fees(&ctx, ack_type, &dest_chain_id, amount))
            .inspect_err(|e| self.rejected("set_bridge_fees", e))
    }

    async fn request_to_dest(
        &self,
        ctx: TxContext,
        request: OutboundRequest,
    ) -> Result<RequestToDestEvent, GatewayError> {
        let event = self
            .write(|gw| gw.request_to_dest(&ctx, request))
            .inspect_err(|e| self.rejected("request_to_dest", e))?;

        metric_inc!(REQUESTS_TO_DEST, &[event.dest_chain_params.dest_chain_id.as_str()]);
        self.publisher
            .publish(GatewayEvent::RequestToDest(event.clone()))
            .await;
        Ok(event)
    }

    async fn request_from_source(
        &self,
        ctx: TxContext,
        valset: ValidatorSet,
        signatures: Vec<EcdsaSignature>,
        payload: CrossTalkPayload,
    ) -> Result<CrossTalkAckEvent, GatewayError> {
        let event = self
            .write(|gw| gw.request_from_source(&ctx, &valset, &signatures, &payload))
            .inspect_err(|e| self.rejected("request_from_source", e))?;

        let outcome = if event.success { "success" } else { "failure" };
        metric_inc!(REQUESTS_FROM_SOURCE, &[event.src_chain.chain_id.as_str(), outcome]);
        let failed = event.exec_flags.iter().filter(|f| !**f).count();
        BATCH_CALL_FAILURES.inc_by(failed as f64);

        self.publisher
            .publish(GatewayEvent::CrossTalkAck(event.clone()))
            .await;
        Ok(event)
    }

    async fn cross_talk_ack(
        &self,
        _ctx: TxContext,
        valset: ValidatorSet,
        signatures: Vec<EcdsaSignature>,
        ack: CrossTalkAckPayload,
    ) -> Result<AckOutcome, GatewayError> {
        let outcome = self
            .write(|gw| gw.cross_talk_ack(&valset, &signatures, &ack))
            .inspect_err(|e| self.rejected("cross_talk_ack", e))?;
        if outcome == AckOutcome::Recorded {
            metric_inc!(ACKS_PROCESSED);
        }
        Ok(outcome)
    }

    async fn update_valset(
        &self,
        _ctx: TxContext,
        current: ValidatorSet,
        next: ValidatorSet,
        signatures: Vec<EcdsaSignature>,
    ) -> Result<ValsetUpdatedEvent, GatewayError> {
        let event = self
            .write(|gw| gw.update_valset(&current, next, &signatures))
            .inspect_err(|e| self.rejected("update_valset", e))?;

        metric_inc!(VALSET_UPDATES);
        self.publisher
            .publish(GatewayEvent::ValsetUpdated(event.clone()))
            .await;
        Ok(event)
    }

    async fn withdraw_fees(&self, ctx: TxContext, amount: u128) -> Result<u128, GatewayError> {
        self.write(|gw| gw.withdraw_fees(&ctx, amount))
            .inspect_err(|e| self.rejected("withdraw_fees", e))
    }

    async fn register_handler(
        &self,
        address: Vec<u8>,
        handler: Arc<dyn CrossTalkHandler>,
    ) -> Result<(), GatewayError> {
        self.write(|gw| {
            gw.register_handler(address, handler);
            Ok(())
        })
    }
}

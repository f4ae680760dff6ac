//! # Inbound Ports
//!
//! The API relayers, applications and operators drive.

use crate::domain::{AckOutcome, GatewayConfig, GatewayError, OutboundRequest, TxContext};
use crate::ports::outbound::CrossTalkHandler;
use async_trait::async_trait;
use shared_types::{
    AckType, CrossTalkAckEvent, CrossTalkAckPayload, CrossTalkPayload, RequestToDestEvent,
    ValsetUpdatedEvent,
};
use std::sync::Arc;
use xt_01_signature_verification::{EcdsaSignature, ValidatorSet};

/// Gateway API - inbound port.
#[async_trait]
pub trait GatewayApi: Send + Sync {
    /// Install the genesis validator set and fees. Once only.
    async fn initialize(&self, config: GatewayConfig) -> Result<ValsetUpdatedEvent, GatewayError>;

    /// Set the fee for a route. Owner only.
    async fn set_bridge_fees(
        &self,
        ctx: TxContext,
        ack_type: AckType,
        dest_chain_id: String,
        amount: u128,
    ) -> Result<(), GatewayError>;

    /// Sequence an outbound request.
    async fn request_to_dest(
        &self,
        ctx: TxContext,
        request: OutboundRequest,
    ) -> Result<RequestToDestEvent, GatewayError>;

    /// Verify and execute an inbound batch.
    async fn request_from_source(
        &self,
        ctx: TxContext,
        valset: ValidatorSet,
        signatures: Vec<EcdsaSignature>,
        payload: CrossTalkPayload,
    ) -> Result<CrossTalkAckEvent, GatewayError>;

    /// Verify and record an acknowledgment.
    async fn cross_talk_ack(
        &self,
        ctx: TxContext,
        valset: ValidatorSet,
        signatures: Vec<EcdsaSignature>,
        ack: CrossTalkAckPayload,
    ) -> Result<AckOutcome, GatewayError>;

    /// Hand over to a new validator set.
    async fn update_valset(
        &self,
        ctx: TxContext,
        current: ValidatorSet,
        next: ValidatorSet,
        signatures: Vec<EcdsaSignature>,
    ) -> Result<ValsetUpdatedEvent, GatewayError>;

    /// Withdraw collected fees. Owner only. Returns the remaining balance.
    async fn withdraw_fees(&self, ctx: TxContext, amount: u128) -> Result<u128, GatewayError>;

    /// Register a destination application.
    async fn register_handler(
        &self,
        address: Vec<u8>,
        handler: Arc<dyn CrossTalkHandler>,
    ) -> Result<(), GatewayError>;
}

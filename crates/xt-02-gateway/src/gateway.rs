//! # Gateway Aggregate
//!
//! One chain's gateway: validator set, fee table, nonce ledger, handler
//! registry, world state and acknowledgment records. Every operation checks
//! everything it needs before it mutates anything.

use crate::adapters::contract_host::ContractHost;
use crate::algorithms::abi::{cross_talk_ack_hash, request_from_source_hash};
use crate::algorithms::ack::AckLedger;
use crate::algorithms::execution::execute_batch;
use crate::algorithms::inbound::{build_ack_event, precheck, request_context, AckMarkers};
use crate::algorithms::outbound::{sequence_request, validate_request};
use crate::domain::{
    invariant_owner, AckOutcome, FeeTable, GatewayConfig, GatewayError, NonceLedger,
    OutboundRequest, Overlay, StateLayer, TxContext, WorldState,
};
use crate::ports::outbound::CrossTalkHandler;
use shared_types::{
    AckType, Address, ChainIdentity, CrossTalkAckEvent, CrossTalkAckPayload, CrossTalkPayload,
    RequestToDestEvent, ValsetUpdatedEvent,
};
use std::sync::Arc;
use tracing::{debug, info};
use xt_01_signature_verification::{
    EcdsaSignature, SignatureVerificationApi, SignatureVerificationService, ValidatorSet,
    ValidatorSetRegistry,
};
use xt_telemetry::log_gateway_event;

/// A CrossTalk gateway.
pub struct Gateway {
    identity: ChainIdentity,
    owner: Address,
    valsets: ValidatorSetRegistry,
    verifier: Arc<dyn SignatureVerificationApi>,
    fees: FeeTable,
    nonces: NonceLedger,
    fee_balance: u128,
    host: ContractHost,
    state: WorldState,
    acks: AckLedger,
}

impl Gateway {
    /// Initialize from configuration.
    ///
    /// Emits the genesis `ValsetUpdated` event, which takes event nonce 1.
    pub fn initialize(config: GatewayConfig) -> Result<(Self, ValsetUpdatedEvent), GatewayError> {
        Self::initialize_with_verifier(config, Arc::new(SignatureVerificationService::new()))
    }

    /// Initialize with a custom verification backend.
    pub fn initialize_with_verifier(
        config: GatewayConfig,
        verifier: Arc<dyn SignatureVerificationApi>,
    ) -> Result<(Self, ValsetUpdatedEvent), GatewayError> {
        config.validate()?;
        let valsets = ValidatorSetRegistry::new(config.genesis_valset(), config.min_total_power)?;

        let mut gateway = Self {
            identity: config.identity(),
            owner: config.owner,
            valsets,
            verifier,
            fees: config.fees.iter().cloned().collect(),
            nonces: NonceLedger::new(),
            fee_balance: 0,
            host: ContractHost::new(),
            state: WorldState::new(),
            acks: AckLedger::new(),
        };
        let event = gateway.valset_event();

        log_gateway_event!(
            info,
            gateway.identity,
            "[xt-02] gateway initialized",
            valset_nonce = event.valset_nonce,
            validators = event.validators.len()
        );
        Ok((gateway, event))
    }

    fn valset_event(&mut self) -> ValsetUpdatedEvent {
        let event_nonce = self.nonces.next_event_nonce();
        let current = self.valsets.current();
        ValsetUpdatedEvent {
            valset_nonce: current.valset_nonce,
            event_nonce,
            chain: self.identity.clone(),
            validators: current.validators.clone(),
            powers: current.powers.clone(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// This chain's identity.
    pub fn identity(&self) -> &ChainIdentity {
        &self.identity
    }

    /// Administrator account.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Active validator set.
    pub fn valset(&self) -> &ValidatorSet {
        self.valsets.current()
    }

    /// Checkpoint of the active validator set.
    pub fn valset_checkpoint(&self) -> [u8; 32] {
        self.valsets.checkpoint()
    }

    /// Fee table.
    pub fn fees(&self) -> &FeeTable {
        &self.fees
    }

    /// Counters and replay guard.
    pub fn nonces(&self) -> &NonceLedger {
        &self.nonces
    }

    /// Fees collected and not yet withdrawn.
    pub fn fee_balance(&self) -> u128 {
        self.fee_balance
    }

    /// Handler registry.
    pub fn host(&self) -> &ContractHost {
        &self.host
    }

    /// Committed handler storage.
    pub fn state(&self) -> &WorldState {
        &self.state
    }

    /// Committed value of one handler storage slot.
    pub fn storage_value(&self, contract: &[u8], key: &[u8]) -> Option<Vec<u8>> {
        self.state.read(contract, key)
    }

    /// Recorded acknowledgment.
    pub fn ack(&self, event_identifier: u64, cross_talk_nonce: u64) -> Option<&CrossTalkAckPayload> {
        self.acks.get(event_identifier, cross_talk_nonce)
    }

    // =========================================================================
    // Administration
    // =========================================================================

    /// Register the destination application at `address`.
    pub fn register_handler(&mut self, address: impl Into<Vec<u8>>, handler: Arc<dyn CrossTalkHandler>) {
        self.host.register(address, handler);
    }

    /// Set the fee for a route. Owner only.
    pub fn set_bridge_fees(
        &mut self,
        ctx: &TxContext,
        ack_type: AckType,
        dest_chain_id: &str,
        amount: u128,
    ) -> Result<(), GatewayError> {
        invariant_owner(ctx, &self.owner)?;
        self.fees.set_fee(ack_type, dest_chain_id, amount);
        info!(?ack_type, dest_chain_id, amount, "[xt-02] bridge fee set");
        Ok(())
    }

    /// Withdraw collected fees. Owner only. Returns the remaining balance.
    pub fn withdraw_fees(&mut self, ctx: &TxContext, amount: u128) -> Result<u128, GatewayError> {
        invariant_owner(ctx, &self.owner)?;
        if amount > self.fee_balance {
            return Err(GatewayError::InsufficientBalance {
                requested: amount,
                available: self.fee_balance,
            });
        }
        self.fee_balance -= amount;
        info!(amount, remaining = self.fee_balance, "[xt-02] fees withdrawn");
        Ok(self.fee_balance)
    }

    /// Hand over to a new validator set signed by the active one.
    pub fn update_valset(
        &mut self,
        current: &ValidatorSet,
        next: ValidatorSet,
        signatures: &[EcdsaSignature],
    ) -> Result<ValsetUpdatedEvent, GatewayError> {
        self.valsets
            .apply_update(current, next, signatures, self.verifier.as_ref())?;
        let event = self.valset_event();
        log_gateway_event!(
            info,
            self.identity,
            "[xt-02] validator set updated",
            valset_nonce = event.valset_nonce,
            event_nonce = event.event_nonce
        );
        Ok(event)
    }

    // =========================================================================
    // Cross-chain operations
    // =========================================================================

    /// Sequence an outbound request.
    pub fn request_to_dest(
        &mut self,
        ctx: &TxContext,
        request: OutboundRequest,
    ) -> Result<RequestToDestEvent, GatewayError> {
        validate_request(&self.fees, ctx, &request)?;

        self.fee_balance = self.fee_balance.saturating_add(ctx.value);
        let event = sequence_request(&mut self.nonces, &self.identity, ctx, request);

        info!(
            event_nonce = event.event_nonce,
            request_identifier = event.src_chain_params.request_identifier,
            dest_chain_id = %event.dest_chain_params.dest_chain_id,
            calls = event.contract_calls.dest_contract_addresses.len(),
            "[xt-02] outbound request sequenced"
        );
        Ok(event)
    }

    /// Verify and execute an inbound batch.
    ///
    /// Verification failures abort with no state change. Call failures are
    /// reported in the returned acknowledgment.
    pub fn request_from_source(
        &mut self,
        ctx: &TxContext,
        valset: &ValidatorSet,
        signatures: &[EcdsaSignature],
        payload: &CrossTalkPayload,
    ) -> Result<CrossTalkAckEvent, GatewayError> {
        precheck(payload, ctx)?;
        self.valsets.ensure_current(valset)?;
        let message_hash = request_from_source_hash(payload, &self.identity);
        self.verifier
            .verify_quorum(valset, signatures, &message_hash)?;
        self.nonces
            .consume(&payload.source_params, payload.cross_talk_nonce)?;

        let call_ctx = request_context(payload);
        let outcome = if payload.is_read_call {
            let mut scratch = Overlay::new(&mut self.state);
            execute_batch(
                &self.host,
                &mut scratch,
                &call_ctx,
                &payload.contract_calls,
                payload.is_atomic,
            )
        } else {
            execute_batch(
                &self.host,
                &mut self.state,
                &call_ctx,
                &payload.contract_calls,
                payload.is_atomic,
            )
        };
        debug!(
            cross_talk_nonce = payload.cross_talk_nonce,
            failed_calls = outcome.failed_calls(),
            "[xt-02] batch executed"
        );

        let markers = AckMarkers {
            ack_request_identifier: self
                .nonces
                .next_ack_request_identifier(&payload.source_params.identity()),
            event_nonce: self.nonces.next_event_nonce(),
        };
        let event = build_ack_event(payload, &self.identity, markers, outcome);

        info!(
            src_chain = %event.src_chain,
            cross_talk_nonce = event.cross_talk_nonce,
            event_nonce = event.event_nonce,
            success = event.success,
            "[xt-02] inbound request executed"
        );
        Ok(event)
    }

    /// Verify and record an acknowledgment for a request sent from this chain.
    pub fn cross_talk_ack(
        &mut self,
        valset: &ValidatorSet,
        signatures: &[EcdsaSignature],
        ack: &CrossTalkAckPayload,
    ) -> Result<AckOutcome, GatewayError> {
        self.valsets.ensure_current(valset)?;
        let message_hash = cross_talk_ack_hash(ack, &self.identity);
        self.verifier
            .verify_quorum(valset, signatures, &message_hash)?;

        if self.acks.contains(ack) {
            debug!(
                event_identifier = ack.event_identifier,
                cross_talk_nonce = ack.cross_talk_nonce,
                "[xt-02] acknowledgment already recorded"
            );
            return Ok(AckOutcome::AlreadyProcessed);
        }

        let delivered = self
            .host
            .deliver_ack(&mut self.state, ack)
            .map_err(|revert| GatewayError::AckHandlerFailed {
                revert_data: revert.0,
            })?;
        self.acks.record(ack.clone());

        info!(
            event_identifier = ack.event_identifier,
            cross_talk_nonce = ack.cross_talk_nonce,
            delivered,
            "[xt-02] acknowledgment recorded"
        );
        Ok(AckOutcome::Recorded)
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("identity", &self.identity)
            .field("valset_nonce", &self.valsets.valset_nonce())
            .field("event_nonce", &self.nonces.event_nonce())
            .field("fee_balance", &self.fee_balance)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

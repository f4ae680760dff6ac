//! # Nonce Ledger
//!
//! Counters that order the gateway's output and guard its input:
//!
//! | Counter | Key | First value |
//! |---------|-----|-------------|
//! | event nonce | gateway-wide | 1 (initialization) |
//! | request identifier | destination chain | 1 |
//! | ack request identifier | source chain | 1 |
//!
//! Consumed inbound requests are keyed by (source params, cross-talk nonce).

use super::errors::GatewayError;
use shared_types::{ChainIdentity, SourceParams};
use std::collections::{HashMap, HashSet};

/// Sequencing and replay state of one gateway.
#[derive(Clone, Debug, Default)]
pub struct NonceLedger {
    event_nonce: u64,
    outbound: HashMap<ChainIdentity, u64>,
    ack_requests: HashMap<ChainIdentity, u64>,
    consumed: HashSet<(SourceParams, u64)>,
}

impl NonceLedger {
    /// Fresh ledger, nothing emitted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last event nonce handed out.
    pub fn event_nonce(&self) -> u64 {
        self.event_nonce
    }

    /// Last request identifier for `dest`, 0 if none.
    pub fn request_identifier(&self, dest: &ChainIdentity) -> u64 {
        self.outbound.get(dest).copied().unwrap_or(0)
    }

    /// Last ack request identifier for `source`, 0 if none.
    pub fn ack_request_identifier(&self, source: &ChainIdentity) -> u64 {
        self.ack_requests.get(source).copied().unwrap_or(0)
    }

    /// Next gateway-wide event nonce.
    pub fn next_event_nonce(&mut self) -> u64 {
        self.event_nonce += 1;
        self.event_nonce
    }

    /// Next request identifier towards `dest`.
    pub fn next_request_identifier(&mut self, dest: &ChainIdentity) -> u64 {
        let counter = self.outbound.entry(dest.clone()).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Next ack request identifier for requests from `source`.
    pub fn next_ack_request_identifier(&mut self, source: &ChainIdentity) -> u64 {
        let counter = self.ack_requests.entry(source.clone()).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Has this inbound request been executed?
    pub fn is_consumed(&self, source: &SourceParams, cross_talk_nonce: u64) -> bool {
        self.consumed.contains(&(source.clone(), cross_talk_nonce))
    }

    /// Fail with `ReplayedRequest` if already consumed.
    pub fn ensure_unconsumed(
        &self,
        source: &SourceParams,
        cross_talk_nonce: u64,
    ) -> Result<(), GatewayError> {
        if self.is_consumed(source, cross_talk_nonce) {
            return Err(GatewayError::ReplayedRequest {
                source_chain: source.identity(),
                cross_talk_nonce,
            });
        }
        Ok(())
    }

    /// Mark an inbound request consumed.
    pub fn consume(
        &mut self,
        source: &SourceParams,
        cross_talk_nonce: u64,
    ) -> Result<(), GatewayError> {
        self.ensure_unconsumed(source, cross_talk_nonce)?;
        self.consumed.insert((source.clone(), cross_talk_nonce));
        Ok(())
    }
}

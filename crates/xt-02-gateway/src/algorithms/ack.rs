//! # Ack Relay
//!
//! Bookkeeping for acknowledgments returning to the origin chain.
//! Idempotency key: (event identifier, cross-talk nonce).

use shared_types::CrossTalkAckPayload;
use std::collections::BTreeMap;

/// Recorded acknowledgments.
#[derive(Clone, Debug, Default)]
pub struct AckLedger {
    records: BTreeMap<(u64, u64), CrossTalkAckPayload>,
}

impl AckLedger {
    /// Empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotency key of an ack.
    pub fn key(ack: &CrossTalkAckPayload) -> (u64, u64) {
        (ack.event_identifier, ack.cross_talk_nonce)
    }

    /// Was this ack recorded?
    pub fn contains(&self, ack: &CrossTalkAckPayload) -> bool {
        self.records.contains_key(&Self::key(ack))
    }

    /// Record an ack. Returns false if its key was already present.
    pub fn record(&mut self, ack: CrossTalkAckPayload) -> bool {
        let key = Self::key(&ack);
        if self.records.contains_key(&key) {
            return false;
        }
        self.records.insert(key, ack);
        true
    }

    /// Recorded ack by key.
    pub fn get(&self, event_identifier: u64, cross_talk_nonce: u64) -> Option<&CrossTalkAckPayload> {
        self.records.get(&(event_identifier, cross_talk_nonce))
    }

    /// Number of recorded acks.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

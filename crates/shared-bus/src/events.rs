//! # Gateway Events
//!
//! Defines the event envelope that flows through the shared bus. Payload
//! records live in `shared-types/src/events.rs`.

use serde::{Deserialize, Serialize};
use shared_types::entities::{ChainIdentity, ChainType};
use shared_types::events::{CrossTalkAckEvent, RequestToDestEvent, ValsetUpdatedEvent};

/// All events a gateway publishes to the bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatewayEvent {
    /// Validator set installed (initialization or signed update).
    ValsetUpdated(ValsetUpdatedEvent),

    /// Outbound request accepted and sequenced.
    /// Source: origin gateway | Target: relayer to the destination chain
    RequestToDest(RequestToDestEvent),

    /// Inbound batch executed.
    /// Source: destination gateway | Target: relayer back to the origin chain
    CrossTalkAck(CrossTalkAckEvent),
}

impl GatewayEvent {
    /// Get the topic for this event.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::ValsetUpdated(_) => EventTopic::Valset,
            Self::RequestToDest(_) => EventTopic::Outbound,
            Self::CrossTalkAck(_) => EventTopic::Ack,
        }
    }

    /// Chain whose gateway emitted this event.
    #[must_use]
    pub fn source_chain(&self) -> ChainIdentity {
        match self {
            Self::ValsetUpdated(e) => e.chain.clone(),
            Self::RequestToDest(e) => ChainIdentity::new(
                e.src_chain_params.src_chain_type,
                e.src_chain_params.src_chain_id.clone(),
            ),
            Self::CrossTalkAck(e) => e.dest_chain.clone(),
        }
    }

    /// Gateway-wide event nonce carried by the event.
    #[must_use]
    pub fn event_nonce(&self) -> u64 {
        match self {
            Self::ValsetUpdated(e) => e.event_nonce,
            Self::RequestToDest(e) => e.event_nonce,
            Self::CrossTalkAck(e) => e.event_nonce,
        }
    }
}

/// Event topics for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Validator-set updates.
    Valset,
    /// Outbound requests.
    Outbound,
    /// Execution acknowledgments.
    Ack,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Emitting chains to include. Empty means all chains.
    pub source_chains: Vec<ChainIdentity>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            source_chains: Vec::new(),
        }
    }

    /// Create a filter for events emitted by specific chains.
    #[must_use]
    pub fn from_chains(chains: Vec<ChainIdentity>) -> Self {
        Self {
            topics: Vec::new(),
            source_chains: chains,
        }
    }

    /// Narrow this filter to one emitting chain.
    #[must_use]
    pub fn on_chain(mut self, chain_type: ChainType, chain_id: impl Into<String>) -> Self {
        self.source_chains
            .push(ChainIdentity::new(chain_type, chain_id));
        self
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &GatewayEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let source_match =
            self.source_chains.is_empty() || self.source_chains.contains(&event.source_chain());

        topic_match && source_match
    }
}

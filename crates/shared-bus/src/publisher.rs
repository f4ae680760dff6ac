//! # Event Publisher
//!
//! Gateways hand every emitted event to an `EventPublisher`. The in-memory
//! bus fans each one out to all subscribers and keeps per-topic tallies so a
//! relayer can tell whether it has seen everything a chain emitted.

use crate::events::{EventFilter, EventTopic, GatewayEvent};
use crate::subscriber::{EventStream, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Sink for gateway events.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Broadcast `event`. Returns how many subscribers were live to receive it.
    async fn publish(&self, event: GatewayEvent) -> usize;

    /// Events handed to this publisher so far, delivered or not.
    fn events_published(&self) -> u64;
}

/// Per-topic publication tallies.
#[derive(Debug, Default)]
struct TopicCounters {
    valset: AtomicU64,
    outbound: AtomicU64,
    ack: AtomicU64,
}

impl TopicCounters {
    fn slot(&self, topic: EventTopic) -> Option<&AtomicU64> {
        match topic {
            EventTopic::Valset => Some(&self.valset),
            EventTopic::Outbound => Some(&self.outbound),
            EventTopic::Ack => Some(&self.ack),
            EventTopic::All => None,
        }
    }

    fn bump(&self, topic: EventTopic) {
        if let Some(counter) = self.slot(topic) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn get(&self, topic: EventTopic) -> u64 {
        match self.slot(topic) {
            Some(counter) => counter.load(Ordering::Relaxed),
            None => self.total(),
        }
    }

    fn total(&self) -> u64 {
        self.valset.load(Ordering::Relaxed)
            + self.outbound.load(Ordering::Relaxed)
            + self.ack.load(Ordering::Relaxed)
    }
}

/// Process-local bus over `tokio::sync::broadcast`.
///
/// Several gateways may share one bus; subscribers narrow by emitting chain.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<GatewayEvent>,
    published: TopicCounters,
    capacity: usize,
}

impl InMemoryEventBus {
    /// Bus buffering [`DEFAULT_CHANNEL_CAPACITY`] events per subscriber.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Bus buffering `capacity` events per subscriber before it lags.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            published: TopicCounters::default(),
            capacity,
        }
    }

    /// Open a subscription. Only events published afterwards are seen.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(topics = ?filter.topics, chains = ?filter.source_chains, "[bus] subscribed");
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Subscription wrapped as a `Stream`.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        EventStream::new(self.subscribe(filter))
    }

    /// Live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Events published under `topic`. `EventTopic::All` gives the total.
    #[must_use]
    pub fn published_on(&self, topic: EventTopic) -> u64 {
        self.published.get(topic)
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: GatewayEvent) -> usize {
        let topic = event.topic();
        let chain = event.source_chain();
        let event_nonce = event.event_nonce();
        self.published.bump(topic);

        // A send with no receivers is not an error for the emitting gateway.
        let delivered = self.sender.send(event).unwrap_or_else(|_| {
            warn!(?topic, chain = %chain, event_nonce, "[bus] no subscribers, event dropped");
            0
        });
        if delivered > 0 {
            debug!(?topic, chain = %chain, event_nonce, receivers = delivered, "[bus] published");
        }
        delivered
    }

    fn events_published(&self) -> u64 {
        self.published.total()
    }
}

#[async_trait]
impl<T: EventPublisher + ?Sized> EventPublisher for Arc<T> {
    async fn publish(&self, event: GatewayEvent) -> usize {
        (**self).publish(event).await
    }

    fn events_published(&self) -> u64 {
        (**self).events_published()
    }
}

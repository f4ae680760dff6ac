//! # Shared Bus - Gateway Event Distribution
//!
//! Carries the events each gateway emits to whoever relays them: the
//! relayer collecting validator signatures, operator tooling, and the
//! integration suite's in-process relayer.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────┐   RequestToDest    ┌──────────────┐
//! │ Gateway (A)  │ ─────────┐         │ Gateway (B)  │
//! └──────────────┘          ▼         └──────────────┘
//!        ↑           ┌──────────────┐        │
//!        │           │  Event Bus   │ ◀──────┘ CrossTalkAck
//!        │           └──────────────┘
//!        └──── relayer ─────┘
//! ```
//!
//! The bus is transport only. Nothing read from it is trusted: every
//! payload a relayer submits is re-verified against the validator set.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

pub use events::{EventFilter, EventTopic, GatewayEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, EventSubscriber, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        assert_eq!(DEFAULT_CHANNEL_CAPACITY, 1000);
    }
}

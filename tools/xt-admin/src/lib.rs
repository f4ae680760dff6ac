//! XT-Admin: CrossTalk operator tooling
//!
//! Computes the exact bytes validators sign, so operators can check a
//! signer's output or a relayer's submission by hand.

pub mod digest;

pub use digest::{ack_digest, checkpoint_digest, request_digest, Digest};

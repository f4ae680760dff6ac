//! # Signature Verification Subsystem (XT-01)
//!
//! Checks validator attestations for CrossTalk gateways.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Pure cryptographic logic, no I/O
//! - **Ports Layer** (`ports/`): The API gateways drive
//! - **Service Layer** (`service.rs`): Wires domain logic to ports, with metrics
//!
//! ## Signing Scheme
//!
//! Validators sign `keccak256("\x19Ethereum Signed Message:\n32" || hash)`
//! with secp256k1. A signature set is accepted when the recovered signers
//! are members, appear in strictly ascending address order, and together
//! hold at least two thirds of the total power.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: Signatures with high S values are rejected
//! - **Replay across epochs**: every signed hash binds the validator-set nonce

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::checkpoint::{checkpoint, encode_checkpoint, method_tag, CHECKPOINT_METHOD};
pub use domain::ecdsa::{
    address_from_pubkey, eth_signed_message_hash, keccak256, recover_prehash, recover_signer,
};
pub use domain::entities::{has_quorum, EcdsaSignature, ValidatorSet};
pub use domain::errors::{SignatureError, VerificationError};
pub use domain::quorum::{recover_all, SignatureVerifier};
pub use domain::registry::ValidatorSetRegistry;
pub use ports::inbound::SignatureVerificationApi;
pub use service::SignatureVerificationService;

#[cfg(any(test, feature = "test-utils"))]
pub use domain::ecdsa::test_helpers;

//! # Inbound Ports (Driving Ports / API)
//!
//! The verification API a gateway drives. Implementations must be
//! thread-safe (`Send + Sync`).

use crate::domain::entities::{EcdsaSignature, ValidatorSet};
use crate::domain::errors::{SignatureError, VerificationError};
use shared_types::{Address, Hash};

/// Primary Signature Verification API.
pub trait SignatureVerificationApi: Send + Sync {
    /// Recover the signer of a personal-message signature over `message_hash`.
    ///
    /// # Security
    /// - Rejects signatures with high S values (EIP-2 malleability protection)
    fn recover_signer(
        &self,
        message_hash: &Hash,
        signature: &EcdsaSignature,
    ) -> Result<Address, SignatureError>;

    /// Check that `signatures` carry at least two thirds of `set`'s power.
    ///
    /// Returns the accumulated power on success.
    fn verify_quorum(
        &self,
        set: &ValidatorSet,
        signatures: &[EcdsaSignature],
        message_hash: &Hash,
    ) -> Result<u64, VerificationError>;

    /// Checkpoint hash of `set`.
    fn checkpoint(&self, set: &ValidatorSet) -> Hash;
}

//! # Validator-Set Checkpoints
//!
//! A checkpoint is the hash validators sign to hand over to a new roster:
//! `keccak256(abi.encode(bytes32 "checkpoint", uint64 valsetNonce,
//! address[] validators, uint64[] powers))`.

use super::ecdsa::keccak256;
use super::entities::ValidatorSet;
use alloy_primitives::{Address as AbiAddress, FixedBytes};
use alloy_sol_types::SolValue;
use shared_types::Hash;

/// Method tag prefixed to every checkpoint encoding.
pub const CHECKPOINT_METHOD: [u8; 32] = method_tag("checkpoint");

/// Right-zero-padded ASCII method name as a `bytes32`. Names longer than 32 bytes are truncated.
pub const fn method_tag(name: &str) -> [u8; 32] {
    let bytes = name.as_bytes();
    let mut tag = [0u8; 32];
    let mut i = 0;
    while i < bytes.len() && i < 32 {
        tag[i] = bytes[i];
        i += 1;
    }
    tag
}

/// Canonical ABI encoding of a validator set.
pub fn encode_checkpoint(set: &ValidatorSet) -> Vec<u8> {
    let validators: Vec<AbiAddress> = set.validators.iter().map(|v| AbiAddress::from(*v)).collect();
    let powers: Vec<u64> = set.powers.iter().map(|p| u64::from(*p)).collect();

    (
        FixedBytes::<32>::from(CHECKPOINT_METHOD),
        set.valset_nonce,
        validators,
        powers,
    )
        .abi_encode_params()
}

/// Checkpoint hash of a validator set.
pub fn checkpoint(set: &ValidatorSet) -> Hash {
    keccak256(&encode_checkpoint(set))
}

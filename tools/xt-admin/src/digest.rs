//! Canonical encodings and their digests.

use serde::Serialize;
use shared_types::{ChainIdentity, CrossTalkAckPayload, CrossTalkPayload};
use xt_01_signature_verification::{encode_checkpoint, eth_signed_message_hash, keccak256, ValidatorSet};
use xt_02_gateway::{encode_cross_talk_ack, encode_request_from_source};

/// An encoding, its keccak256 and the EIP-191 digest validators sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Digest {
    /// `0x`-prefixed ABI encoding
    pub encoded: String,
    /// `0x`-prefixed keccak256 of the encoding
    pub message_hash: String,
    /// `0x`-prefixed EIP-191 digest of the message hash
    pub signed_digest: String,
}

impl Digest {
    fn of(encoded: &[u8]) -> Self {
        let message_hash = keccak256(encoded);
        Self {
            encoded: prefixed(encoded),
            message_hash: prefixed(&message_hash),
            signed_digest: prefixed(&eth_signed_message_hash(&message_hash)),
        }
    }
}

fn prefixed(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// What `dest`'s validators sign to execute `payload` there.
pub fn request_digest(payload: &CrossTalkPayload, dest: &ChainIdentity) -> Digest {
    Digest::of(&encode_request_from_source(payload, dest))
}

/// What `origin`'s validators sign to deliver `ack` there.
pub fn ack_digest(ack: &CrossTalkAckPayload, origin: &ChainIdentity) -> Digest {
    Digest::of(&encode_cross_talk_ack(ack, origin))
}

/// Checkpoint of a validator set.
pub fn checkpoint_digest(set: &ValidatorSet) -> Digest {
    Digest::of(&encode_checkpoint(set))
}

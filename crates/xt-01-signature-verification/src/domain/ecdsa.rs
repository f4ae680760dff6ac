//! # ECDSA Recovery (secp256k1)
//!
//! Signer recovery for validator signatures.
//!
//! Validators sign with Ethereum's personal-message scheme: the signed
//! digest is `keccak256("\x19Ethereum Signed Message:\n32" || message_hash)`.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: S must not exceed half the curve order
//! - **Scalar Range Validation**: R and S must be in [1, n-1]
//! - **Constant-Time Comparisons**: scalar checks use the `subtle` crate

use super::entities::EcdsaSignature;
use super::errors::SignatureError;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};
use shared_types::{Address, Hash};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// secp256k1 curve order n
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// n / 2, rounded down
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Prefix for EIP-191 personal messages over a 32-byte payload.
const ETH_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&hasher.finalize());
    hash
}

/// EIP-191 digest of a 32-byte message hash (what `signMessage` signs).
pub fn eth_signed_message_hash(message_hash: &Hash) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(ETH_MESSAGE_PREFIX);
    hasher.update(message_hash);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&hasher.finalize());
    hash
}

/// Derive Ethereum address from public key.
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let encoded = public_key.to_encoded_point(false);
    // Skip the 0x04 SEC1 tag
    let hash = keccak256(&encoded.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Recover the signer of a personal-message signature over `message_hash`.
pub fn recover_signer(
    message_hash: &Hash,
    signature: &EcdsaSignature,
) -> Result<Address, SignatureError> {
    recover_prehash(&eth_signed_message_hash(message_hash), signature)
}

/// Recover the signer of a raw prehash signature.
///
/// Rejects out-of-range scalars and high-S signatures before attempting recovery.
pub fn recover_prehash(digest: &Hash, signature: &EcdsaSignature) -> Result<Address, SignatureError> {
    if !is_valid_scalar(&signature.r) || !is_valid_scalar(&signature.s) {
        return Err(SignatureError::InvalidFormat);
    }
    if !is_low_s(&signature.s) {
        return Err(SignatureError::MalleableSignature);
    }
    let recovery_id = parse_recovery_id(signature.v)?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);
    let parsed = Signature::from_slice(&sig_bytes);
    sig_bytes.zeroize();
    let sig = parsed.map_err(|_| SignatureError::InvalidFormat)?;

    let key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    Ok(address_from_pubkey(&key))
}

/// `s <= n/2` (EIP-2), compared in constant time.
pub(crate) fn is_low_s(s: &[u8; 32]) -> bool {
    !ct_less_than(&SECP256K1_HALF_ORDER, s)
}

/// Scalar in [1, n-1].
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }
    let below_order = Choice::from(ct_less_than(scalar, &SECP256K1_ORDER) as u8);
    (!is_zero & below_order).into()
}

/// Big-endian `a < b` without early exit.
fn ct_less_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for (x, y) in a.iter().zip(b.iter()) {
        let undecided = !(less | greater);
        less |= undecided & Choice::from((x < y) as u8);
        greater |= undecided & Choice::from((x > y) as u8);
    }

    less.into()
}

/// Valid v values: 0, 1, 27, 28
fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(SignatureError::InvalidRecoveryId(v)),
    };
    RecoveryId::try_from(id).map_err(|_| SignatureError::InvalidRecoveryId(v))
}

/// n - s, used to flip a signature between its low-S and high-S forms.
pub fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow = 0i16;

    for i in (0..32).rev() {
        let diff = i16::from(SECP256K1_ORDER[i]) - i16::from(s[i]) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }

    result
}

// =============================================================================
// TEST HELPERS
// =============================================================================

/// Key generation and validator signing for tests across the workspace.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_helpers {
    use super::*;
    use crate::domain::entities::ValidatorSet;
    use k256::ecdsa::SigningKey;

    /// A validator key with its derived address.
    #[derive(Clone)]
    pub struct TestValidator {
        /// Private key
        pub key: SigningKey,
        /// Ethereum address of the key
        pub address: Address,
    }

    impl TestValidator {
        /// Fresh random validator.
        pub fn random() -> Self {
            let key = SigningKey::random(&mut rand::thread_rng());
            let address = address_from_pubkey(key.verifying_key());
            Self { key, address }
        }

        /// Personal-message signature over `message_hash`.
        pub fn sign(&self, message_hash: &Hash) -> EcdsaSignature {
            sign_prehash(&eth_signed_message_hash(message_hash), &self.key)
        }
    }

    /// `n` random validators sorted by ascending address.
    pub fn sorted_validators(n: usize) -> Vec<TestValidator> {
        let mut validators: Vec<TestValidator> = (0..n).map(|_| TestValidator::random()).collect();
        validators.sort_by_key(|v| v.address);
        validators
    }

    /// Validator set over the given validators.
    pub fn validator_set(validators: &[TestValidator], powers: &[u32], nonce: u64) -> ValidatorSet {
        ValidatorSet {
            validators: validators.iter().map(|v| v.address).collect(),
            powers: powers.to_vec(),
            valset_nonce: nonce,
        }
    }

    /// Signatures from `signers` in the order given.
    pub fn sign_all(signers: &[&TestValidator], message_hash: &Hash) -> Vec<EcdsaSignature> {
        signers.iter().map(|v| v.sign(message_hash)).collect()
    }

    /// Low-S prehash signature with v in {27, 28}.
    pub fn sign_prehash(digest: &Hash, key: &SigningKey) -> EcdsaSignature {
        let (sig, recid) = match key.sign_prehash_recoverable(digest) {
            Ok(pair) => pair,
            Err(e) => panic!("signing a 32-byte prehash cannot fail: {e}"),
        };

        let sig_bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&sig_bytes[..32]);
        s.copy_from_slice(&sig_bytes[32..]);

        let mut parity = recid.to_byte() & 1;
        if !is_low_s(&s) {
            s = invert_s(&s);
            parity ^= 1;
        }

        EcdsaSignature { r, s, v: 27 + parity }
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================

//! # XT-01 Quorum Verification Benchmarks
//!
//! Every inbound batch and acknowledgment pays for one quorum check, so its
//! cost bounds relayer throughput.
//!
//! Conditions:
//! - Validator sets from 1 to 100 members
//! - Sequential recovery below the parallel threshold, rayon above it
//! - A failing set with the bad signature last, so all recoveries run

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use rand::RngCore;
use std::time::Duration;
use xt_01_signature_verification::test_helpers::{sign_all, sorted_validators, validator_set};
use xt_01_signature_verification::{checkpoint, recover_all, SignatureVerifier};

fn random_hash() -> [u8; 32] {
    let mut hash = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut hash);
    hash
}

pub fn quorum_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("xt-01/quorum_verify");
    group.measurement_time(Duration::from_secs(10));
    let verifier = SignatureVerifier::new();

    for size in [1usize, 4, 16, 50, 100] {
        let validators = sorted_validators(size);
        let set = validator_set(&validators, &vec![100; size], 1);
        let hash = random_hash();
        let signers: Vec<_> = validators.iter().collect();
        let signatures = sign_all(&signers, &hash);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("full_set", size),
            &(set, signatures, hash),
            |b, (set, sigs, hash)| b.iter(|| black_box(verifier.verify(set, sigs, hash).is_ok())),
        );
    }

    group.finish();
}

pub fn recovery_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("xt-01/recover_all");
    group.measurement_time(Duration::from_secs(10));

    for size in [3usize, 4, 32, 128] {
        let validators = sorted_validators(size);
        let hash = random_hash();
        let signers: Vec<_> = validators.iter().collect();
        let signatures = sign_all(&signers, &hash);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &signatures, |b, sigs| {
            b.iter(|| black_box(recover_all(sigs, &hash)))
        });
    }

    group.finish();
}

pub fn checkpoint_hashing(c: &mut Criterion) {
    let mut group = c.benchmark_group("xt-01/checkpoint");

    for size in [4usize, 100] {
        let validators = sorted_validators(size);
        let set = validator_set(&validators, &vec![100; size], 7);
        group.bench_with_input(BenchmarkId::from_parameter(size), &set, |b, set| {
            b.iter(|| black_box(checkpoint(set)))
        });
    }

    group.finish();
}

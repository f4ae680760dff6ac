//! # XT-02 Gateway Benchmarks
//!
//! - Message hashing for growing batches
//! - Outbound sequencing
//! - Full inbound path: quorum check, replay guard, batch execution

use criterion::{black_box, BatchSize, BenchmarkId, Criterion, Throughput};
use shared_types::ContractCallBatch;
use std::cell::Cell;
use std::sync::Arc;
use std::time::Duration;
use xt_02_gateway::test_helpers::{
    greeting_payload, inbound_payload, outbound_request, GreetingHandler, TestValidators,
    CHAIN_ID, DEST_CHAIN_ID, NOW,
};
use xt_02_gateway::{request_from_source_hash, Gateway, TxContext};

const HELLO: [u8; 20] = [0xaa; 20];
const RELAYER: [u8; 20] = [0x7e; 20];

fn greetings(count: usize) -> ContractCallBatch {
    (0..count).fold(ContractCallBatch::empty(), |batch, i| {
        batch.with_call(HELLO.to_vec(), greeting_payload(&format!("greeting {i}")))
    })
}

pub fn message_hashing(c: &mut Criterion) {
    let mut group = c.benchmark_group("xt-02/request_hash");
    let validators = TestValidators::new(1);
    let (gateway, _) = Gateway::initialize(validators.config(DEST_CHAIN_ID)).unwrap();

    for calls in [1usize, 10, 100] {
        let payload = inbound_payload(&RELAYER, false, greetings(calls));
        group.throughput(Throughput::Elements(calls as u64));
        group.bench_with_input(BenchmarkId::from_parameter(calls), &payload, |b, payload| {
            b.iter(|| black_box(request_from_source_hash(payload, gateway.identity())))
        });
    }

    group.finish();
}

pub fn outbound_sequencing(c: &mut Criterion) {
    let mut group = c.benchmark_group("xt-02/request_to_dest");
    let validators = TestValidators::new(1);
    let (mut gateway, _) = Gateway::initialize(validators.config(CHAIN_ID)).unwrap();
    let ctx = TxContext::new(RELAYER, NOW).with_value(1000);

    group.bench_function("single_call", |b| {
        b.iter_batched(
            || outbound_request(DEST_CHAIN_ID),
            |request| black_box(gateway.request_to_dest(&ctx, request).is_ok()),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

pub fn inbound_execution(c: &mut Criterion) {
    let mut group = c.benchmark_group("xt-02/request_from_source");
    group.measurement_time(Duration::from_secs(10));

    for size in [1usize, 16] {
        let validators = TestValidators::new(size);
        let (mut gateway, _) = Gateway::initialize(validators.config(DEST_CHAIN_ID)).unwrap();
        gateway.register_handler(HELLO.to_vec(), Arc::new(GreetingHandler));
        let identity = gateway.identity().clone();
        let valset = validators.valset();
        let ctx = TxContext::new(RELAYER, NOW);
        let nonce = Cell::new(0u64);

        group.bench_function(BenchmarkId::new("validators", size), |b| {
            b.iter_batched(
                || {
                    nonce.set(nonce.get() + 1);
                    let mut payload = inbound_payload(&RELAYER, false, greetings(4));
                    payload.cross_talk_nonce = nonce.get();
                    let signatures = validators.sign_request(&payload, &identity);
                    (payload, signatures)
                },
                |(payload, signatures)| {
                    black_box(
                        gateway
                            .request_from_source(&ctx, &valset, &signatures, &payload)
                            .is_ok(),
                    )
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

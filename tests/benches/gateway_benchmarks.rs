//! # CrossTalk Gateway Benchmarks
//!
//! | Subsystem | Path | Target |
//! |-----------|------|--------|
//! | xt-01 Signature Verification | quorum over 100 validators | < 10ms |
//! | xt-01 Signature Verification | checkpoint hash | < 100μs |
//! | xt-02 Gateway | inbound batch, 16 validators | < 5ms |
//! | xt-02 Gateway | outbound sequencing | < 50μs |

use criterion::{criterion_group, criterion_main};
use xt_tests::benchmarks::{xt_01_quorum, xt_02_gateway};

criterion_group!(
    benches,
    xt_01_quorum::quorum_verify,
    xt_01_quorum::recovery_scaling,
    xt_01_quorum::checkpoint_hashing,
    xt_02_gateway::message_hashing,
    xt_02_gateway::outbound_sequencing,
    xt_02_gateway::inbound_execution,
);

criterion_main!(benches);

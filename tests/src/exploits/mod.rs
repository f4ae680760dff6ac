//! # Attack Simulations
//!
//! Each module plays an adversary against a live gateway and checks that
//! the attack fails closed: an error, and no state change.
//!
//! | Module | Attack |
//! |--------|--------|
//! | `replay` | Resubmitting executed batches, cross-chain reuse of attestations |
//! | `signatures` | Malleated, duplicated, reordered or forged signatures |
//! | `valset` | Seizing the gateway through validator-set updates |

pub mod replay;
pub mod signatures;
pub mod valset;

#[cfg(test)]
pub(crate) mod fixtures {
    use shared_types::{ContractCallBatch, CrossTalkPayload};
    use std::sync::Arc;
    use xt_02_gateway::test_helpers::{
        greeting_payload, inbound_payload, GreetingHandler, TestValidators, NOW,
    };
    use xt_02_gateway::{Gateway, TxContext};

    pub const HELLO: [u8; 20] = [0xaa; 20];
    pub const ATTACKER: [u8; 20] = [0x66; 20];

    /// Gateway on `chain_id` governed by `validators`, with a greeting handler.
    pub fn gateway(validators: &TestValidators, chain_id: &str) -> Gateway {
        let (mut gateway, _) = Gateway::initialize(validators.config(chain_id)).unwrap();
        gateway.register_handler(HELLO.to_vec(), Arc::new(GreetingHandler));
        gateway
    }

    /// A request from chain 1 setting the greeting.
    pub fn greeting_request(greeting: &str) -> CrossTalkPayload {
        let calls = ContractCallBatch::empty().with_call(HELLO.to_vec(), greeting_payload(greeting));
        inbound_payload(&ATTACKER, false, calls)
    }

    pub fn relayer() -> TxContext {
        TxContext::new(ATTACKER, NOW)
    }
}

//! Ports layer: the API this subsystem offers to gateways.

pub mod inbound;

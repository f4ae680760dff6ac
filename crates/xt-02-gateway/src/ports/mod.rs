//! # Ports Layer
//!
//! - Inbound: `GatewayApi`
//! - Outbound: `CrossTalkHandler`

pub mod inbound;
pub mod outbound;

pub use inbound::GatewayApi;
pub use outbound::{CrossTalkHandler, HandlerRevert, RequestContext};

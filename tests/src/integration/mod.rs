//! Cross-crate scenarios: router plus PingPong on two chains.

mod ping_pong_flows;
mod router_flows;

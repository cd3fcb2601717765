// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_NODE_ID: &str = "node_123";
pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_IN_FLIGHT: usize = 64;

/// Static configuration of one node. Nothing here changes after start-up.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub bind_addr: SocketAddr,
    /// Identity reported in the acknowledgments this node sends.
    pub node_id: String,
    /// Base URLs of the peers this node fans broadcasts out to.
    pub peers: Vec<String>,
    /// Upper bound on a single peer delivery or acknowledgment dispatch.
    pub delivery_timeout: Duration,
    /// Maximum outbound requests running at once, per kind.
    pub max_in_flight: usize,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
            node_id: DEFAULT_NODE_ID.to_string(),
            peers: Vec::new(),
            delivery_timeout: DEFAULT_DELIVERY_TIMEOUT,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }
}

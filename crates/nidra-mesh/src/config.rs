//! Mesh-wide configuration: mailbox sizing, TTL defaults, gossip cadence.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    pub max_mailbox_size: usize,
    pub default_ttl_ms: i64,
    pub gossip_interval_ms: u64,
    pub gossip_fanout: usize,
    pub suspect_timeout_ms: i64,
    pub dead_timeout_ms: i64,
    pub default_ask_timeout_ms: u64,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            max_mailbox_size: 1000,
            default_ttl_ms: 30_000,
            gossip_interval_ms: 2_000,
            gossip_fanout: 3,
            suspect_timeout_ms: 10_000,
            dead_timeout_ms: 30_000,
            default_ask_timeout_ms: 5_000,
        }
    }
}

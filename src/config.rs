use std::env;
use std::time::Duration;

use crate::network::normalize_address;

/// Runtime settings, read from the environment (after `.env`, if present).
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    /// Address peers use to reach this node; also used to skip ourselves
    /// when broadcasting.
    pub node_url: String,
    /// Peer to announce ourselves to at startup.
    pub seed_node: Option<String>,
    pub peer_timeout: Duration,
}

impl NodeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let host = get("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port: u16 = get("PORT").and_then(|v| v.parse().ok()).unwrap_or(8080);
        let node_url = get("NODE_URL")
            .map(|u| normalize_address(&u).to_string())
            .unwrap_or_else(|| format!("http://{host}:{port}"));
        let seed_node = get("SEED_NODE")
            .map(|u| normalize_address(&u).to_string())
            .filter(|u| !u.is_empty());
        let peer_timeout = get("PEER_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(5));

        Self {
            host,
            port,
            node_url,
            seed_node,
            peer_timeout,
        }
    }
}

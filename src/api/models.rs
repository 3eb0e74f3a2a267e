use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bid::Bid;
use crate::network::HttpPeerClient;
use crate::node::Node;

/// Shared application state: the node driven by every handler.
pub type AppState = Node<HttpPeerClient>;

/* ---------- Request Models ---------- */

#[derive(Debug, Serialize, Deserialize)]
pub struct NewNodeRequest {
    pub new_node_url: String,
}

/* ---------- Response Models ---------- */

/// Body returned by every state-changing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub name: String,
    pub status: String,
    pub time: DateTime<Utc>,
}

impl ApiResponse {
    pub fn new(name: &str, status: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: status.into(),
            time: Utc::now(),
        }
    }
}

#[derive(Serialize)]
pub struct MineResponse {
    pub mined_index: u64,
    pub hash: String,
    pub nonce: u64,
    pub bids: usize,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

#[derive(Serialize)]
pub struct ConsensusResponse {
    pub replaced: bool,
    pub length: usize,
    pub source: Option<String>,
}

#[derive(Serialize)]
pub struct BidsResponse {
    pub count: usize,
    pub bids: Vec<Bid>,
}

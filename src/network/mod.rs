pub mod broadcast;
pub mod client;
pub mod peers;

pub use broadcast::broadcast;
pub use client::{HttpPeerClient, PeerClient};
pub use peers::{PeerRegistry, Registration, normalize_address};

/// Every route a peer exposes lives under this prefix.
pub const API_PREFIX: &str = "/api/v1";

pub const BLOCKCHAIN_PATH: &str = "/api/v1/blockchain/";
pub const BID_PATH: &str = "/api/v1/bid/";
pub const RECEIVE_BLOCK_PATH: &str = "/api/v1/receive-new-block/";
pub const REGISTER_NODE_PATH: &str = "/api/v1/register-node/";
pub const REGISTER_NODES_BULK_PATH: &str = "/api/v1/register-nodes-bulk/";
pub const REGISTER_AND_BROADCAST_NODE_PATH: &str = "/api/v1/register-and-broadcast-node/";

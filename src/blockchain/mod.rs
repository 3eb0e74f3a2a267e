pub mod block;
pub mod model;
pub mod pow;

pub use block::{Block, BlockData};
pub use model::{Blockchain, chain_is_valid};
pub use pow::{encode_block_data, hash_block, proof_of_work_until};
#[cfg(test)]
pub use pow::proof_of_work;

/// Every mined hash must start with this prefix. Fixed; never retargeted.
pub const DIFFICULTY_PREFIX: &str = "0000";

/// Nonce recorded on the genesis block (not a proof-of-work result).
pub const GENESIS_NONCE: u64 = 100;

/// Placeholder used both as the genesis hash and as its previous hash.
pub const GENESIS_HASH: &str = "0";

use serde::{Deserialize, Serialize};

use crate::bid::{Bid, BidPool};
use crate::blockchain::{Block, Blockchain, GENESIS_HASH, GENESIS_NONCE};
use crate::network::PeerRegistry;

/// Everything one node knows: its chain, its pending bids and its peers.
#[derive(Debug)]
pub struct Ledger {
    pub blockchain: Blockchain,
    pub pending: BidPool,
    pub peers: PeerRegistry,
}

/// Serializable view of a [`Ledger`], served to clients and fetched from
/// peers during consensus.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub chain: Vec<Block>,
    pub pending_bids: Vec<Bid>,
    pub network_nodes: Vec<String>,
}

impl Ledger {
    /// Fresh state: empty pool, no peers, a chain holding only genesis.
    pub fn new() -> Self {
        let mut ledger = Self {
            blockchain: Blockchain::new(),
            pending: BidPool::new(),
            peers: PeerRegistry::new(),
        };
        ledger.create_block(GENESIS_NONCE, GENESIS_HASH, GENESIS_HASH);
        ledger
    }

    /// Seal every pending bid into a new block at the end of the chain.
    /// The pool is drained as part of the call.
    ///
    /// The index follows the tip's index, not the chain length, so it stays
    /// linked after consensus adopts a chain numbered from elsewhere. Callers
    /// reject a tip at `u64::MAX` before sealing.
    pub fn create_block(&mut self, nonce: u64, previous_hash: &str, hash: &str) -> Block {
        let last = self.blockchain.last_block().ok();
        let index = last.map_or(1, |b| b.index.saturating_add(1));
        let after = last.map(|b| b.timestamp);
        let block = Block::new(
            index,
            self.pending.drain(),
            nonce,
            hash.to_string(),
            previous_hash.to_string(),
            after,
        );
        self.blockchain.append(block.clone());
        block
    }

    /// Append a block mined elsewhere if it links to our tip. On success the
    /// pending pool is cleared.
    pub fn accept_block(&mut self, block: Block) -> bool {
        if !self.blockchain.check_new_block_hash(&block) {
            return false;
        }
        self.pending.drain();
        self.blockchain.append(block);
        true
    }

    pub fn snapshot(&self) -> ChainSnapshot {
        ChainSnapshot {
            chain: self.blockchain.chain.clone(),
            pending_bids: self.pending.bids().to_vec(),
            network_nodes: self.peers.peers(),
        }
    }

    /// Mined bids matching `pred`, in chain order.
    fn mined_bids(&self, pred: impl Fn(&Bid) -> bool) -> Vec<Bid> {
        self.blockchain
            .chain
            .iter()
            .flat_map(|b| b.bids.iter())
            .filter(|bid| pred(bid))
            .cloned()
            .collect()
    }

    pub fn bids_for_auction(&self, auction_id: i64) -> Vec<Bid> {
        self.mined_bids(|bid| bid.auction_id == auction_id)
    }

    pub fn bids_for_bidder(&self, bidder_name: &str) -> Vec<Bid> {
        self.mined_bids(|bid| bid.bidder_name == bidder_name)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

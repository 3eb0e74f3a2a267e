//! Node-local state and the operations the HTTP layer drives.

pub mod ledger;
pub mod miner;

pub use ledger::{ChainSnapshot, Ledger};
pub use miner::{MineOutcome, Miner};

use std::sync::{Mutex, MutexGuard};

use actix_web::web;
use futures::future::join_all;
use log::{debug, info, warn};
use serde_json::json;

use crate::bid::Bid;
use crate::blockchain::{
    Block, BlockData, chain_is_valid, encode_block_data, hash_block, proof_of_work_until,
};
use crate::error::{LedgerError, PeerError};
use crate::network::{
    BID_PATH, PeerClient, RECEIVE_BLOCK_PATH, REGISTER_AND_BROADCAST_NODE_PATH,
    REGISTER_NODE_PATH, REGISTER_NODES_BULK_PATH, Registration, broadcast, normalize_address,
};

/// Result of a consensus round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsensusOutcome {
    Replaced { source: String, length: usize },
    Kept { length: usize },
}

/// What one mining attempt committed to before searching.
struct Candidate {
    previous_hash: String,
    index: u64,
    data: String,
    pool_len: usize,
}

enum Seal {
    Sealed(Block),
    /// The tip moved; the pool is left as it is.
    Stale,
    /// Bids arrived during the search; the hash no longer covers the pool.
    PoolGrew,
}

/// One running node: its ledger behind a single lock, its own address and
/// the client it uses to reach peers.
pub struct Node<C> {
    ledger: Mutex<Ledger>,
    own_url: String,
    client: C,
    miner: Miner,
}

impl<C: PeerClient> Node<C> {
    pub fn new(own_url: impl Into<String>, client: C) -> Self {
        let own_url: String = own_url.into();
        Self {
            ledger: Mutex::new(Ledger::new()),
            own_url: normalize_address(&own_url).to_string(),
            client,
            miner: Miner::new(),
        }
    }

    pub fn own_url(&self) -> &str {
        &self.own_url
    }

    fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().expect("mutex poisoned")
    }

    fn broadcast_targets(&self) -> Vec<String> {
        self.ledger().peers.peers_except(&self.own_url)
    }

    /* -------------------- Bids -------------------- */

    pub fn submit_bid(&self, bid: Bid) {
        let mut ledger = self.ledger();
        ledger.pending.submit(bid);
        debug!("BID - pending pool size now {}", ledger.pending.len());
    }

    /// Register locally, then forward the bid to every peer's plain bid
    /// endpoint. Returns how many peers took it.
    pub async fn submit_and_broadcast_bid(&self, bid: Bid) -> usize {
        let payload = json!(bid);
        self.submit_bid(bid);
        let peers = self.broadcast_targets();
        broadcast(&self.client, &peers, BID_PATH, &payload).await
    }

    /* -------------------- Mining -------------------- */

    /// Mine the pending pool into a new block and broadcast it.
    ///
    /// The proof-of-work search runs on the blocking pool without the ledger
    /// lock. If bids arrive meanwhile the search restarts so the hash always
    /// covers exactly the bids sealed in the block.
    pub async fn mine(&self) -> Result<MineOutcome, LedgerError> {
        loop {
            let candidate = self.candidate()?;
            self.miner.reset();
            let Some(nonce) = self.search(&candidate).await? else {
                info!("MINER - search for block #{} stopped, tip moved", candidate.index);
                return Ok(MineOutcome::Abandoned);
            };

            let block = match self.seal(&candidate, nonce)? {
                Seal::Sealed(block) => block,
                Seal::Stale => return Ok(MineOutcome::Abandoned),
                Seal::PoolGrew => continue,
            };

            info!(
                "MINER - sealed block #{} (hash={}, nonce={}, bids={})",
                block.index,
                block.hash,
                block.nonce,
                block.bids.len()
            );
            let peers = self.broadcast_targets();
            let delivered =
                broadcast(&self.client, &peers, RECEIVE_BLOCK_PATH, &json!(block)).await;
            debug!("MINER - block #{} reached {delivered}/{} peers", block.index, peers.len());
            return Ok(MineOutcome::Mined(block));
        }
    }

    /// Snapshot the tip and pending pool a mining attempt builds on. The
    /// hash payload carries the tip's index alongside the pending bids.
    fn candidate(&self) -> Result<Candidate, LedgerError> {
        let ledger = self.ledger();
        if ledger.pending.is_empty() {
            debug!("MINER - pool is empty, mining a block without bids");
        }
        let last = ledger.blockchain.last_block()?;
        let index = last
            .index
            .checked_add(1)
            .ok_or(LedgerError::IndexOverflow(last.index))?;
        Ok(Candidate {
            previous_hash: last.hash.clone(),
            index,
            data: encode_block_data(&BlockData::new(last.index, ledger.pending.bids())),
            pool_len: ledger.pending.len(),
        })
    }

    /// Proof of work for `candidate`, off the async workers. `None` once the
    /// miner's stop signal is raised.
    async fn search(&self, candidate: &Candidate) -> Result<Option<u64>, LedgerError> {
        let stop = self.miner.stop_signal();
        let (prev, payload) = (candidate.previous_hash.clone(), candidate.data.clone());
        web::block(move || proof_of_work_until(&prev, &payload, &stop))
            .await
            .map_err(|_| LedgerError::MiningInterrupted)
    }

    /// Append the mined block if nothing moved since `candidate` was taken.
    fn seal(&self, candidate: &Candidate, nonce: u64) -> Result<Seal, LedgerError> {
        let mut ledger = self.ledger();
        let tip = ledger.blockchain.last_block()?;
        let extends_tip = tip.hash == candidate.previous_hash
            && tip.index.checked_add(1) == Some(candidate.index);
        if !extends_tip {
            warn!("MINER - block #{} is stale, dropping result", candidate.index);
            return Ok(Seal::Stale);
        }
        if ledger.pending.len() != candidate.pool_len {
            debug!(
                "MINER - pool grew {} -> {} during search, re-mining",
                candidate.pool_len,
                ledger.pending.len()
            );
            return Ok(Seal::PoolGrew);
        }
        let hash = hash_block(&candidate.previous_hash, &candidate.data, nonce);
        Ok(Seal::Sealed(ledger.create_block(nonce, &candidate.previous_hash, &hash)))
    }

    /// Accept a block mined by a peer if it links to our tip.
    pub fn receive_block(&self, block: Block) -> bool {
        let index = block.index;
        let accepted = self.ledger().accept_block(block);
        if accepted {
            self.miner.stop();
            info!("BLOCK - accepted block #{index} from peer");
        } else {
            warn!("BLOCK - rejected block #{index}: does not link to local tip");
        }
        accepted
    }

    /* -------------------- Peers -------------------- */

    /// Add a single peer. The node's own address is never stored and is
    /// reported as already present.
    pub fn register_node(&self, url: &str) -> Registration {
        let url = normalize_address(url);
        if url == self.own_url {
            debug!("PEERS - ignoring own address {url}");
            return Registration::AlreadyPresent;
        }
        self.ledger().peers.register(url)
    }

    /// Add many peers at once. Returns how many were new.
    pub fn register_nodes_bulk(&self, urls: &[String]) -> usize {
        urls.iter()
            .filter(|url| self.register_node(url) == Registration::Added)
            .count()
    }

    /// Node-join protocol: register `url`; if it was new, tell every
    /// previously known peer about it and hand it our full roster.
    pub async fn register_and_broadcast_node(&self, url: &str) -> Registration {
        let url = normalize_address(url);
        if self.register_node(url) == Registration::AlreadyPresent {
            debug!("PEERS - {url} already known, nothing to broadcast");
            return Registration::AlreadyPresent;
        }

        let (previous, known) = {
            let ledger = self.ledger();
            let previous = ledger
                .peers
                .peers_except(url)
                .into_iter()
                .filter(|p| *p != self.own_url)
                .collect::<Vec<_>>();
            (previous, ledger.peers.len())
        };
        broadcast(&self.client, &previous, REGISTER_NODE_PATH, &json!({ "new_node_url": url })).await;

        let mut roster = previous;
        roster.push(self.own_url.clone());
        let bulk_url = format!("{url}{REGISTER_NODES_BULK_PATH}");
        if let Err(e) = self.client.post(&bulk_url, &json!(roster)).await {
            warn!("PEERS - could not send roster to {url}: {e}");
        }
        info!(
            "PEERS - {url} joined; sent roster of {} addresses, {known} peers known",
            roster.len()
        );
        Registration::Added
    }

    /// Announce this node to `seed`, which then spreads it to the network.
    pub async fn join_network(&self, seed: &str) -> Result<(), PeerError> {
        let url = format!("{seed}{REGISTER_AND_BROADCAST_NODE_PATH}");
        self.client
            .post(&url, &json!({ "new_node_url": self.own_url }))
            .await
    }

    /* -------------------- Consensus -------------------- */

    /// Longest-valid-chain rule: adopt the longest chain served by any peer
    /// if it is strictly longer than ours and passes the linkage check.
    pub async fn resolve(&self) -> ConsensusOutcome {
        let (peers, local_len) = {
            let ledger = self.ledger();
            if ledger.peers.is_empty() {
                debug!("CONSENSUS - no peers known");
            }
            (ledger.peers.peers_except(&self.own_url), ledger.blockchain.len())
        };

        let fetched = join_all(peers.iter().map(|peer| self.client.fetch_chain(peer))).await;

        let mut best: Option<(String, Vec<Block>)> = None;
        let mut best_len = local_len;
        for (peer, result) in peers.into_iter().zip(fetched) {
            let snapshot = match result {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!("CONSENSUS - skipping {peer}: {e}");
                    continue;
                }
            };
            let len = snapshot.chain.len();
            if len <= best_len {
                debug!("CONSENSUS - {peer} chain length {len} is not longer than {best_len}");
                continue;
            }
            if !chain_is_valid(&snapshot.chain) {
                warn!("CONSENSUS - {peer} served an invalid chain of length {len}");
                continue;
            }
            best_len = len;
            best = Some((peer, snapshot.chain));
        }

        let mut ledger = self.ledger();
        match best {
            Some((source, chain)) if chain.len() > ledger.blockchain.len() => {
                let length = chain.len();
                ledger.blockchain.replace(chain);
                self.miner.stop();
                info!("CONSENSUS - replaced local chain with {length} blocks from {source}");
                ConsensusOutcome::Replaced { source, length }
            }
            _ => {
                let length = ledger.blockchain.len();
                debug!("CONSENSUS - kept local chain of {length} blocks");
                ConsensusOutcome::Kept { length }
            }
        }
    }

    /* -------------------- Queries -------------------- */

    pub fn snapshot(&self) -> ChainSnapshot {
        self.ledger().snapshot()
    }

    /// Structural check of the local chain, with its length.
    pub fn validate(&self) -> (bool, usize) {
        let ledger = self.ledger();
        (ledger.blockchain.chain_is_valid(), ledger.blockchain.len())
    }

    pub fn bids_for_auction(&self, auction_id: i64) -> Vec<Bid> {
        self.ledger().bids_for_auction(auction_id)
    }

    pub fn bids_for_bidder(&self, bidder_name: &str) -> Vec<Bid> {
        self.ledger().bids_for_bidder(bidder_name)
    }
}

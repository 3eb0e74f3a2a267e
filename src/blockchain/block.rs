use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::bid::Bid;

/// A single block in the chain, bundling a batch of bids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: i64, // Unix nanoseconds (UTC)
    pub bids: Vec<Bid>,
    pub nonce: u64,
    pub hash: String,
    pub previous_block_hash: String,
}

impl Block {
    /// Build a block stamped with the current time. `after` is the timestamp
    /// of the block it will follow, if any; the new stamp is kept strictly
    /// greater so timestamps increase along the chain.
    pub fn new(
        index: u64,
        bids: Vec<Bid>,
        nonce: u64,
        hash: String,
        previous_block_hash: String,
        after: Option<i64>,
    ) -> Self {
        let now = Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX);
        let timestamp = match after {
            Some(prev) if now <= prev => prev.saturating_add(1),
            _ => now,
        };
        Self {
            index,
            timestamp,
            bids,
            nonce,
            hash,
            previous_block_hash,
        }
    }
}

/// The part of a candidate block covered by its proof of work.
#[derive(Debug, Serialize)]
pub struct BlockData<'a> {
    pub index: String,
    pub bids: &'a [Bid],
}

impl<'a> BlockData<'a> {
    pub fn new(index: u64, bids: &'a [Bid]) -> Self {
        Self {
            index: index.to_string(),
            bids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Block;

    #[test]
    fn timestamps_strictly_increase() {
        let far_future = i64::MAX - 10;
        let b = Block::new(2, vec![], 0, "h".into(), "p".into(), Some(far_future));
        assert_eq!(b.timestamp, far_future + 1);

        let first = Block::new(1, vec![], 0, "a".into(), "0".into(), None);
        let second = Block::new(2, vec![], 0, "b".into(), "a".into(), Some(first.timestamp));
        assert!(second.timestamp > first.timestamp);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let b = Block::new(1, vec![], 100, "0".into(), "0".into(), None);
        let json = serde_json::to_value(&b).unwrap();
        for field in ["index", "timestamp", "bids", "nonce", "hash", "previous_block_hash"] {
            assert!(json.get(field).is_some(), "missing {field}");
        }
    }
}

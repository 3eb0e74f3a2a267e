use std::sync::atomic::{AtomicBool, Ordering};

use base64::{Engine as _, engine::general_purpose::URL_SAFE};
use sha2::{Digest, Sha256};

use super::{BlockData, DIFFICULTY_PREFIX};

/// Serialize the block payload to JSON and turn it into URL-safe base64
/// text, so the hash input is one flat string.
pub fn encode_block_data(data: &BlockData<'_>) -> String {
    // Only strings, integers and decimals inside; serialization cannot fail.
    let json = serde_json::to_vec(data).unwrap_or_default();
    URL_SAFE.encode(json)
}

/// SHA-256 over `previous_hash ++ block_data ++ nonce`, hex encoded.
pub fn hash_block(previous_hash: &str, block_data: &str, nonce: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(previous_hash.as_bytes());
    hasher.update(block_data.as_bytes());
    hasher.update(nonce.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

/// Uncancellable form of [`proof_of_work_until`].
#[cfg(test)]
pub fn proof_of_work(previous_hash: &str, block_data: &str) -> u64 {
    let never = AtomicBool::new(false);
    // Without a stop signal the search only ends on success.
    proof_of_work_until(previous_hash, block_data, &never).unwrap_or(u64::MAX)
}

/// Find the smallest nonce, counting up from 0, whose hash starts with
/// [`DIFFICULTY_PREFIX`]. Abandoned with `None` once `stop` is set.
pub fn proof_of_work_until(previous_hash: &str, block_data: &str, stop: &AtomicBool) -> Option<u64> {
    let mut nonce: u64 = 0;
    loop {
        if stop.load(Ordering::Relaxed) {
            return None;
        }
        if hash_block(previous_hash, block_data, nonce).starts_with(DIFFICULTY_PREFIX) {
            return Some(nonce);
        }
        nonce = nonce.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bid::Bid;
    use rust_decimal::Decimal;

    fn sample_data() -> String {
        let bids = vec![
            Bid::new("alice", 7, Decimal::new(12345, 2)),
            Bid::new("bob", 7, Decimal::new(500, 0)),
        ];
        encode_block_data(&BlockData::new(2, &bids))
    }

    #[test]
    fn hash_is_deterministic_hex() {
        let data = sample_data();
        let a = hash_block("prev", &data, 42);
        let b = hash_block("prev", &data, 42);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn hash_changes_with_each_input() {
        let data = sample_data();
        let base = hash_block("prev", &data, 42);
        assert_ne!(base, hash_block("prev2", &data, 42));
        assert_ne!(base, hash_block("prev", "other-data", 42));
        assert_ne!(base, hash_block("prev", &data, 43));
    }

    #[test]
    fn encoded_payload_is_url_safe() {
        let data = sample_data();
        assert!(
            data.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '=')
        );
    }

    #[test]
    fn proof_of_work_finds_smallest_nonce() {
        let data = sample_data();
        let nonce = proof_of_work("0", &data);
        assert!(hash_block("0", &data, nonce).starts_with(DIFFICULTY_PREFIX));
        for smaller in 0..nonce {
            assert!(!hash_block("0", &data, smaller).starts_with(DIFFICULTY_PREFIX));
        }
    }

    #[test]
    fn proof_of_work_is_reproducible() {
        let data = sample_data();
        assert_eq!(proof_of_work("abc", &data), proof_of_work("abc", &data));
    }

    #[test]
    fn stop_signal_abandons_search() {
        let stop = AtomicBool::new(true);
        assert_eq!(proof_of_work_until("0", &sample_data(), &stop), None);
    }
}

use std::collections::BTreeSet;

/// Outcome of registering a peer address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Added,
    AlreadyPresent,
}

/// Canonical form of a peer address: no trailing slash, so route paths can be
/// appended directly and `http://a:1/` and `http://a:1` are the same peer.
pub fn normalize_address(address: &str) -> &str {
    address.trim_end_matches('/')
}

/// Known peer addresses. Grows only; peers are never evicted.
///
/// Kept ordered so listings are stable, but nothing downstream relies on
/// the order.
#[derive(Debug, Default, Clone)]
pub struct PeerRegistry {
    peers: BTreeSet<String>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self {
            peers: BTreeSet::new(),
        }
    }

    /// Insert `address` unless it is already known. Does not filter the
    /// node's own address; callers handle that.
    pub fn register(&mut self, address: &str) -> Registration {
        if self.peers.insert(address.to_string()) {
            Registration::Added
        } else {
            Registration::AlreadyPresent
        }
    }

    #[cfg(test)]
    pub fn contains(&self, address: &str) -> bool {
        self.peers.contains(address)
    }

    pub fn peers(&self) -> Vec<String> {
        self.peers.iter().cloned().collect()
    }

    /// Every known peer other than `address`.
    pub fn peers_except(&self, address: &str) -> Vec<String> {
        self.peers
            .iter()
            .filter(|p| p.as_str() != address)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_registration_is_a_no_op() {
        let mut reg = PeerRegistry::new();
        assert_eq!(reg.register("http://a:1"), Registration::Added);
        assert_eq!(reg.register("http://a:1"), Registration::AlreadyPresent);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn registry_does_not_filter_any_address() {
        let mut reg = PeerRegistry::new();
        assert_eq!(reg.register("http://me:1"), Registration::Added);
        assert!(reg.contains("http://me:1"));
    }

    #[test]
    fn peers_except_skips_one_address() {
        let mut reg = PeerRegistry::new();
        reg.register("http://b:2");
        reg.register("http://a:1");
        reg.register("http://me:9");
        assert_eq!(reg.peers_except("http://me:9"), vec!["http://a:1", "http://b:2"]);
        assert_eq!(reg.peers().len(), 3);
    }

    #[test]
    fn normalize_address_drops_trailing_slashes() {
        assert_eq!(normalize_address("http://a:1/"), "http://a:1");
        assert_eq!(normalize_address("http://a:1//"), "http://a:1");
        assert_eq!(normalize_address("http://a:1"), "http://a:1");
    }
}

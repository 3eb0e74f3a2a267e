use super::model::Bid;

/// Bids accepted by this node but not yet mined into a block.
///
/// The pool only ever grows through [`BidPool::submit`] or is emptied as a
/// whole through [`BidPool::drain`]; it is never partially consumed.
#[derive(Debug, Default, Clone)]
pub struct BidPool {
    bids: Vec<Bid>,
}

impl BidPool {
    pub fn new() -> Self {
        Self { bids: Vec::new() }
    }

    pub fn submit(&mut self, bid: Bid) {
        self.bids.push(bid);
    }

    /// Take every pending bid, leaving the pool empty.
    pub fn drain(&mut self) -> Vec<Bid> {
        std::mem::take(&mut self.bids)
    }

    pub fn bids(&self) -> &[Bid] {
        &self.bids
    }

    pub fn len(&self) -> usize {
        self.bids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty()
    }
}

use super::Block;
use crate::error::LedgerError;

/// In-memory, append-only chain of blocks.
#[derive(Debug, Default, Clone)]
pub struct Blockchain {
    pub chain: Vec<Block>,
}

impl Blockchain {
    /// An empty chain; the node seeds it with the genesis block.
    pub fn new() -> Self {
        Self { chain: Vec::new() }
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> Result<&Block, LedgerError> {
        self.chain.last().ok_or(LedgerError::EmptyChain)
    }

    pub fn append(&mut self, block: Block) {
        self.chain.push(block);
    }

    /// Swap in a whole new chain (consensus only).
    pub fn replace(&mut self, chain: Vec<Block>) {
        self.chain = chain;
    }

    /// Linkage-only check of a candidate against the current tip: the
    /// candidate must point at the tip's hash and carry the next index.
    /// Proof of work is not re-verified.
    pub fn check_new_block_hash(&self, candidate: &Block) -> bool {
        match self.last_block() {
            Ok(last) => links_to(last, candidate),
            Err(_) => false,
        }
    }

    /// Validate linkage and index sequencing of the whole local chain. A
    /// local chain without genesis is never valid.
    pub fn chain_is_valid(&self) -> bool {
        !self.is_empty() && chain_is_valid(&self.chain)
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

/// Walk `chain` from its second block onward and confirm every adjacent
/// pair is linked by hash and by index. Genesis is exempt.
pub fn chain_is_valid(chain: &[Block]) -> bool {
    chain.windows(2).all(|pair| links_to(&pair[0], &pair[1]))
}

fn links_to(prev: &Block, next: &Block) -> bool {
    next.previous_block_hash == prev.hash && prev.index.checked_add(1) == Some(next.index)
}

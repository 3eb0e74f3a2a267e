use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Stop signal shared with the running proof-of-work search.
#[derive(Debug, Clone, Default)]
pub struct Miner {
    stop_signal: Arc<AtomicBool>,
}

/// Result of one call to `Node::mine`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MineOutcome {
    Mined(crate::blockchain::Block),
    /// The tip moved (peer block or chain replacement) before the block
    /// could be appended. The pending pool was left untouched.
    Abandoned,
}

impl Miner {
    pub fn new() -> Self {
        Self {
            stop_signal: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle passed to the search loop.
    pub fn stop_signal(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_signal)
    }

    /// Ask any in-flight search to give up.
    pub fn stop(&self) {
        self.stop_signal.store(true, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.stop_signal.store(false, Ordering::SeqCst);
    }

    #[cfg(test)]
    pub fn is_stopped(&self) -> bool {
        self.stop_signal.load(Ordering::SeqCst)
    }
}

use thiserror::Error;

/// Failures of the local ledger engine.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("chain has no blocks (genesis missing)")]
    EmptyChain,
    #[error("chain tip index {0} has no successor")]
    IndexOverflow(u64),
    #[error("mining task was interrupted before finishing")]
    MiningInterrupted,
}

/// Failures talking to a remote peer. These are logged and skipped by the
/// broadcast and consensus code, never surfaced to the triggering request.
#[derive(Debug, Error)]
pub enum PeerError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("peer {url} answered with status {status}")]
    Status { url: String, status: u16 },
}

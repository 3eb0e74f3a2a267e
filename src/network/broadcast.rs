use futures::future::join_all;
use log::{debug, warn};
use serde_json::Value;

use super::PeerClient;

/// POST `payload` to `peer + path` for every peer in `peers`.
///
/// Deliveries run concurrently and independently: a failing peer is logged
/// and skipped. Returns how many peers accepted the payload.
pub async fn broadcast<C: PeerClient>(
    client: &C,
    peers: &[String],
    path: &str,
    payload: &Value,
) -> usize {
    let deliveries = peers.iter().map(|peer| async move {
        let url = format!("{peer}{path}");
        match client.post(&url, payload).await {
            Ok(()) => {
                debug!("BROADCAST - delivered to {url}");
                true
            }
            Err(e) => {
                warn!("BROADCAST - {e}");
                false
            }
        }
    });
    join_all(deliveries).await.into_iter().filter(|ok| *ok).count()
}

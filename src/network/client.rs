use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use super::BLOCKCHAIN_PATH;
use crate::error::PeerError;
use crate::node::ChainSnapshot;

/// Outbound calls a node makes to its peers.
pub trait PeerClient: Send + Sync + 'static {
    /// POST `payload` as JSON to the full `url`.
    fn post(&self, url: &str, payload: &Value) -> impl Future<Output = Result<(), PeerError>> + Send;

    /// GET the chain snapshot served by `peer`.
    fn fetch_chain(&self, peer: &str) -> impl Future<Output = Result<ChainSnapshot, PeerError>> + Send;
}

/// [`PeerClient`] over plain HTTP.
#[derive(Debug, Clone)]
pub struct HttpPeerClient {
    http: reqwest::Client,
}

impl HttpPeerClient {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

impl PeerClient for HttpPeerClient {
    async fn post(&self, url: &str, payload: &Value) -> Result<(), PeerError> {
        let resp = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|source| PeerError::Http {
                url: url.to_string(),
                source,
            })?;
        if !resp.status().is_success() {
            return Err(PeerError::Status {
                url: url.to_string(),
                status: resp.status().as_u16(),
            });
        }
        Ok(())
    }

    async fn fetch_chain(&self, peer: &str) -> Result<ChainSnapshot, PeerError> {
        let url = format!("{peer}{BLOCKCHAIN_PATH}");
        let http_err = |source| PeerError::Http {
            url: url.clone(),
            source,
        };
        let resp = self.http.get(&url).send().await.map_err(http_err)?;
        if !resp.status().is_success() {
            return Err(PeerError::Status {
                url: url.clone(),
                status: resp.status().as_u16(),
            });
        }
        resp.json::<ChainSnapshot>().await.map_err(http_err)
    }
}

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::hn::error::HnError;

/// Issues plain GET requests against the remote API and hands back the raw body.
///
/// Status codes are not inspected; whatever body comes back is left to the
/// JSON decoder to accept or reject.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Bytes, HnError>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, HnError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hn-frontend/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(HnError::Client)?;

        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<Bytes, HnError> {
        debug!("GET {}", url);

        let into_error = |source| HnError::Request {
            url: url.to_string(),
            source,
        };

        self.client
            .get(url)
            .send()
            .await
            .map_err(into_error)?
            .bytes()
            .await
            .map_err(into_error)
    }
}

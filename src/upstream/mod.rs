//! HenrikDev API client.
//!
//! Issues authenticated GET requests and maps HTTP outcomes onto [`ApiError`].
//! The network itself sits behind the [`Transport`] trait so the client logic
//! (credential check, status mapping, decoding) is independent of reqwest.

mod credential;
mod endpoints;
mod http;
#[cfg(test)]
pub mod mock;

pub use credential::Credential;
pub use endpoints::{Endpoint, LifetimeFilter};
pub use http::ReqwestTransport;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::ApiConfig;

/// Errors returned by the upstream client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Valorant API not initialized. Please set API key first.")]
    NotInitialized,

    #[error("API error: Unauthorized - Invalid API key")]
    Unauthorized,

    #[error("API error: Player not found")]
    NotFound,

    #[error("API error: HTTP {0} - {1}")]
    Upstream(u16, String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Failure below the HTTP layer (DNS, connect, timeout, body read).
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Performs one authenticated GET.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url, api_key: &str) -> Result<RawResponse, TransportError>;
}

/// Client for the upstream API.
pub struct UpstreamClient {
    transport: Arc<dyn Transport>,
    base_url: Url,
    credential: Credential,
    max_match_batch: usize,
}

impl UpstreamClient {
    /// Create a client over an arbitrary transport with no credential set.
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Unexpected(format!("invalid base URL {}: {}", base_url, e)))?;

        Ok(Self {
            transport,
            base_url,
            credential: Credential::empty(),
            max_match_batch: ApiConfig::default().max_match_batch,
        })
    }

    /// Build the production client from configuration.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_seconds))?;
        let mut client = Self::new(&config.base_url, Arc::new(transport))?;
        client.credential = Credential::new(config.api_key.clone());
        client.max_match_batch = config.max_match_batch;
        Ok(client)
    }

    pub fn with_max_match_batch(mut self, max: usize) -> Self {
        self.max_match_batch = max.max(1);
        self
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Upper bound on per-call match-detail fan-out.
    pub fn max_match_batch(&self) -> usize {
        self.max_match_batch
    }

    /// Absolute URL for an endpoint.
    pub fn url_for(&self, endpoint: &Endpoint) -> Result<Url, ApiError> {
        endpoint.to_url(&self.base_url)
    }

    /// Issue a GET for `endpoint` and return the decoded JSON body.
    pub async fn request(&self, endpoint: &Endpoint) -> Result<Value, ApiError> {
        let api_key = self.credential.get().await.ok_or(ApiError::NotInitialized)?;
        let url = self.url_for(endpoint)?;

        debug!("GET {}", endpoint.path());

        let response = self
            .transport
            .get(&url, &api_key)
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        debug!(status = response.status, path = %endpoint.path(), "upstream response");

        decode_response(response)
    }
}

/// Map a raw HTTP response onto the client's result.
pub fn decode_response(response: RawResponse) -> Result<Value, ApiError> {
    match response.status {
        200 => serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Unexpected(format!("invalid JSON body: {}", e))),
        401 => Err(ApiError::Unauthorized),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::Upstream(status, response.body)),
    }
}

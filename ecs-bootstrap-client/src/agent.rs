//! ECS agent introspection client

use bytes::Bytes;
use futures::stream::{BoxStream, Stream, StreamExt};
use reqwest::Client;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Well-known address of the agent's metadata endpoint
pub const DEFAULT_METADATA_URL: &str = "http://localhost:51678/v1/metadata";

/// A response from the agent whose body has not been received yet
///
/// The body is exposed as a stream of chunks so callers decide how to
/// accumulate it and how to treat a stream that breaks half-way.
pub struct AgentResponse {
    /// HTTP status code
    pub status: u16,
    /// Body chunks, in arrival order
    pub body: BoxStream<'static, Result<Bytes>>,
}

impl AgentResponse {
    /// Creates a response from a status code and a body stream
    pub fn new<S>(status: u16, body: S) -> Self
    where
        S: Stream<Item = Result<Bytes>> + Send + 'static,
    {
        Self {
            status,
            body: body.boxed(),
        }
    }
}

impl std::fmt::Debug for AgentResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// HTTP client for the local ECS agent
#[derive(Debug, Clone)]
pub struct AgentClient {
    /// Full URL of the metadata endpoint
    metadata_url: String,
    /// HTTP client instance
    client: Client,
}

impl AgentClient {
    /// Create a new agent client
    ///
    /// # Arguments
    /// * `metadata_url` - URL of the metadata endpoint (e.g., [`DEFAULT_METADATA_URL`])
    ///
    /// # Example
    /// ```
    /// use ecs_bootstrap_client::{AgentClient, DEFAULT_METADATA_URL};
    ///
    /// let client = AgentClient::new(DEFAULT_METADATA_URL);
    /// ```
    pub fn new(metadata_url: impl Into<String>) -> Self {
        Self::with_client(metadata_url, Client::new())
    }

    /// Create a new agent client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, etc.
    pub fn with_client(metadata_url: impl Into<String>, client: Client) -> Self {
        Self {
            metadata_url: metadata_url.into(),
            client,
        }
    }

    /// Get the metadata endpoint URL
    pub fn metadata_url(&self) -> &str {
        &self.metadata_url
    }

    /// Request node metadata from the agent
    ///
    /// Returns as soon as the response head arrives. Status checking and
    /// body collection are left to the caller.
    pub async fn get_metadata(&self) -> Result<AgentResponse> {
        debug!("GET {}", self.metadata_url);

        let response = self.client.get(&self.metadata_url).send().await?;
        let status = response.status().as_u16();
        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| ClientError::Stream(e.to_string())));

        Ok(AgentResponse::new(status, body))
    }
}

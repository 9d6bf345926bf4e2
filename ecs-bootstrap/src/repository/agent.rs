//! Agent repository
//!
//! Issues the metadata request against the local ECS agent.

use async_trait::async_trait;
use ecs_bootstrap_client::{AgentClient, AgentResponse, Result};

/// Repository trait for the local ECS agent
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Requests the node metadata document
    ///
    /// Returns the raw response; the caller checks the status and drains the
    /// body stream.
    async fn get_metadata(&self) -> Result<AgentResponse>;
}

/// HTTP implementation of AgentRepository
pub struct HttpAgentRepository {
    client: AgentClient,
}

impl HttpAgentRepository {
    /// Creates a new HTTP agent repository
    ///
    /// # Arguments
    /// * `metadata_url` - URL of the agent metadata endpoint
    pub fn new(metadata_url: impl Into<String>) -> Self {
        Self {
            client: AgentClient::new(metadata_url),
        }
    }
}

#[async_trait]
impl AgentRepository for HttpAgentRepository {
    async fn get_metadata(&self) -> Result<AgentResponse> {
        self.client.get_metadata().await
    }
}

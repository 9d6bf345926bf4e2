//! Metadata fetcher
//!
//! Polls the local ECS agent until it serves the node metadata document.
//! The agent may still be starting when the bootstrap runs, so connection
//! failures, non-200 answers and broken bodies are all retried.

use ecs_bootstrap_client::ClientError;
use ecs_bootstrap_core::retry::{RetryError, RetryPolicy, retry_with_fixed_delay};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::ConnectionError;
use crate::repository::AgentRepository;

/// 10 attempts, 2 seconds apart
pub const AGENT_METADATA_RETRY: RetryPolicy =
    RetryPolicy::fixed("Agent metadata request", 10, Duration::from_millis(2000));

/// Failure of a single metadata request
#[derive(Debug, Error)]
enum AttemptError {
    #[error("agent answered with status {0}")]
    UnexpectedStatus(u16),

    #[error(transparent)]
    Transport(#[from] ClientError),
}

/// Fetches the raw metadata document from the agent
pub struct MetadataFetcher {
    agent: Arc<dyn AgentRepository>,
    policy: RetryPolicy,
}

impl MetadataFetcher {
    /// Creates a fetcher using the fixed agent retry policy
    pub fn new(agent: Arc<dyn AgentRepository>) -> Self {
        Self {
            agent,
            policy: AGENT_METADATA_RETRY,
        }
    }

    /// Fetches the metadata document as text
    ///
    /// Succeeds on the first attempt that answers 200 and delivers its whole
    /// body. After the last failed attempt, returns the transport error of
    /// that attempt, or [`ConnectionError::Unavailable`] if it was a non-200
    /// answer.
    pub async fn fetch_metadata(&self) -> Result<String, ConnectionError> {
        let result = retry_with_fixed_delay(
            self.policy,
            |attempt| self.fetch_once(attempt),
            |_| true,
        )
        .await;

        match result {
            Ok(body) => {
                info!("Received {} bytes of agent metadata", body.len());
                Ok(body)
            }
            Err(e) => {
                let attempts = e.attempts();
                Err(match RetryError::into_inner(e) {
                    AttemptError::UnexpectedStatus(status) => {
                        warn!("ECS agent last answered with status {}", status);
                        ConnectionError::Unavailable { attempts }
                    }
                    AttemptError::Transport(e) => ConnectionError::Transport(e),
                })
            }
        }
    }

    async fn fetch_once(&self, attempt: u32) -> Result<String, AttemptError> {
        debug!("Requesting agent metadata (attempt {})", attempt);

        let mut response = self.agent.get_metadata().await?;
        if response.status != 200 {
            return Err(AttemptError::UnexpectedStatus(response.status));
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.body.next().await {
            body.extend_from_slice(&chunk?);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

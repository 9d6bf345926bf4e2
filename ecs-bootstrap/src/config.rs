//! Bootstrap configuration
//!
//! Connection settings for the agent and the orchestrator. Retry counts and
//! pauses are fixed constants, not configuration.

use ecs_bootstrap_client::DEFAULT_METADATA_URL;
use std::time::Duration;

/// Default upper bound for one wait-until-running call (100 polls, 6 s apart)
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(600);

/// Bootstrap configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the agent's metadata endpoint
    pub metadata_url: String,

    /// How long a single confirmation waits for the task to run
    pub wait_timeout: Duration,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(metadata_url: String) -> Self {
        Self {
            metadata_url,
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }

    /// Overrides the confirmation timeout
    pub fn with_wait_timeout(mut self, wait_timeout: Duration) -> Self {
        self.wait_timeout = wait_timeout;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.metadata_url.is_empty() {
            anyhow::bail!("metadata_url cannot be empty");
        }

        if !self.metadata_url.starts_with("http://") && !self.metadata_url.starts_with("https://")
        {
            anyhow::bail!("metadata_url must start with http:// or https://");
        }

        if self.wait_timeout.is_zero() {
            anyhow::bail!("wait_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_METADATA_URL.to_string())
    }
}

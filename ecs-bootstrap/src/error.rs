//! Bootstrap error taxonomy
//!
//! Each stage of the bootstrap has its own error type. They bubble up to
//! `main` unchanged, wrapped in [`BootstrapError`].

use ecs_bootstrap_client::ClientError;
use ecs_bootstrap_core::domain::instance::ArnError;
use ecs_bootstrap_core::domain::task::TaskHandle;
use thiserror::Error;

/// The agent metadata could not be fetched
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The agent kept answering with a non-200 status
    #[error("Could not connect to ecs-agent after {attempts} attempts")]
    Unavailable {
        /// Attempts made
        attempts: u32,
    },

    /// The last attempt failed in the transport (request or body stream)
    #[error(transparent)]
    Transport(#[from] ClientError),
}

/// The agent metadata is malformed
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Agent metadata is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Agent metadata has no ContainerInstanceArn")]
    MissingArn,

    #[error("Agent metadata has a malformed ContainerInstanceArn: {0}")]
    MalformedArn(#[from] ArnError),

    #[error("Agent metadata has no Cluster")]
    MissingCluster,
}

/// A placement + confirmation attempt failed
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The orchestrator answered but placed nothing
    #[error("{reason}")]
    Rejected { reason: String },

    /// The placement request itself failed
    #[error(transparent)]
    Placement(ClientError),

    /// The task was placed but never reached RUNNING
    #[error("Task {task} did not reach RUNNING: {source}")]
    Confirmation {
        task: TaskHandle,
        #[source]
        source: ClientError,
    },
}

/// Any fatal bootstrap error
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Invalid invocation
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Launch(#[from] LaunchError),
}

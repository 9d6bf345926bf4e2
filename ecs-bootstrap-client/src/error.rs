//! Error types for the bootstrap clients

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the ECS agent or the ECS API
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The response body stream broke while it was being received
    #[error("Response stream failed: {0}")]
    Stream(String),

    /// An ECS API call failed
    #[error("ECS {operation} failed: {message}")]
    Ecs {
        /// Name of the ECS operation
        operation: &'static str,
        /// Error message from the SDK, including its source chain
        message: String,
    },

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an ECS error from the operation name and a message
    pub fn ecs(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Ecs {
            operation,
            message: message.into(),
        }
    }

    /// Check if this error came from the ECS API
    pub fn is_ecs(&self) -> bool {
        matches!(self, Self::Ecs { .. })
    }
}

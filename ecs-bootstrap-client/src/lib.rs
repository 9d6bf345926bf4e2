//! ECS Bootstrap clients
//!
//! Clients for the two external services the bootstrap talks to:
//! - [`AgentClient`]: the local ECS agent's introspection endpoint (plain HTTP)
//! - [`EcsClient`]: the region-scoped ECS API (placement and task waiters)
//!
//! # Example
//!
//! ```no_run
//! use ecs_bootstrap_client::{AgentClient, DEFAULT_METADATA_URL};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ecs_bootstrap_client::ClientError> {
//!     let agent = AgentClient::new(DEFAULT_METADATA_URL);
//!     let response = agent.get_metadata().await?;
//!
//!     println!("Agent answered with status {}", response.status);
//!     Ok(())
//! }
//! ```

pub mod error;
mod agent;
mod ecs;

// Re-export commonly used types
pub use agent::{AgentClient, AgentResponse, DEFAULT_METADATA_URL};
pub use ecs::{EcsClient, placement_from_output};
pub use error::{ClientError, Result};

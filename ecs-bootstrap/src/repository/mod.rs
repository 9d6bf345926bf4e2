//! Repository layer
//!
//! Repositories are thin adapters over the external collaborators: the local
//! ECS agent and the ECS API. They carry no business logic and are
//! trait-based so the services can be exercised against mocks.

mod agent;
mod tasks;

// Re-export traits
pub use agent::AgentRepository;
pub use tasks::{TaskRepository, TaskRepositoryFactory};

// Re-export implementations
pub use agent::HttpAgentRepository;
pub use tasks::EcsTaskRepositoryFactory;

//! Tasks repository
//!
//! Handles communication with the ECS API for task-related operations:
//! - Placing a task on a container instance
//! - Waiting for a placed task to reach RUNNING

use async_trait::async_trait;
use aws_config::SdkConfig;
use ecs_bootstrap_client::{EcsClient, Result};
use ecs_bootstrap_core::domain::task::{Placement, StartTask, TaskHandle};
use std::sync::Arc;
use std::time::Duration;

/// Repository trait for task placement with the orchestrator
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Region this repository's client is bound to
    fn region(&self) -> &str;

    /// Requests placement of a task
    ///
    /// A successful call may still have placed nothing; inspect the
    /// returned [`Placement`].
    async fn start_task(&self, request: &StartTask) -> Result<Placement>;

    /// Blocks until the task is RUNNING in `cluster`
    async fn wait_until_running(&self, task: &TaskHandle, cluster: &str) -> Result<()>;
}

/// Builds region-bound task repositories
///
/// The region is only known once the agent metadata has been parsed, so the
/// orchestrator client is constructed through this factory at that point.
pub trait TaskRepositoryFactory: Send + Sync {
    fn for_region(&self, region: &str) -> Arc<dyn TaskRepository>;
}

/// ECS implementation of TaskRepository
pub struct EcsTaskRepository {
    client: EcsClient,
    max_wait: Duration,
}

impl EcsTaskRepository {
    /// Creates a new ECS task repository
    ///
    /// # Arguments
    /// * `client` - Region-bound ECS client
    /// * `max_wait` - Upper bound for a single wait-until-running call
    pub fn new(client: EcsClient, max_wait: Duration) -> Self {
        Self { client, max_wait }
    }
}

#[async_trait]
impl TaskRepository for EcsTaskRepository {
    fn region(&self) -> &str {
        self.client.region()
    }

    async fn start_task(&self, request: &StartTask) -> Result<Placement> {
        self.client.start_task(request).await
    }

    async fn wait_until_running(&self, task: &TaskHandle, cluster: &str) -> Result<()> {
        self.client
            .wait_until_running(task, cluster, self.max_wait)
            .await
    }
}

/// Factory producing [`EcsTaskRepository`] instances from a shared SDK config
pub struct EcsTaskRepositoryFactory {
    sdk_config: SdkConfig,
    max_wait: Duration,
}

impl EcsTaskRepositoryFactory {
    pub fn new(sdk_config: SdkConfig, max_wait: Duration) -> Self {
        Self {
            sdk_config,
            max_wait,
        }
    }
}

impl TaskRepositoryFactory for EcsTaskRepositoryFactory {
    fn for_region(&self, region: &str) -> Arc<dyn TaskRepository> {
        let client = EcsClient::new(&self.sdk_config, region);
        Arc::new(EcsTaskRepository::new(client, self.max_wait))
    }
}

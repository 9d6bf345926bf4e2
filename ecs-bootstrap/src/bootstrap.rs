//! Bootstrap pipeline
//!
//! Runs the three stages strictly in order: fetch the agent metadata, parse
//! it into a node identity, launch the task on that node. Each stage hands
//! its output to the next one; nothing is shared or mutated in between.

use ecs_bootstrap_core::domain::task::LaunchResult;
use std::sync::Arc;
use tracing::info;

use crate::error::BootstrapError;
use crate::repository::{AgentRepository, TaskRepositoryFactory};
use crate::service::{LaunchRequest, MetadataFetcher, TaskLauncher, parse_metadata};

/// Drives a single bootstrap from metadata discovery to a running task
pub struct Bootstrapper {
    fetcher: MetadataFetcher,
    factory: Arc<dyn TaskRepositoryFactory>,
    launcher: TaskLauncher,
}

impl Bootstrapper {
    /// Creates a new bootstrapper
    ///
    /// # Arguments
    /// * `agent` - Access to the local ECS agent
    /// * `factory` - Builds the orchestrator client once the region is known
    pub fn new(agent: Arc<dyn AgentRepository>, factory: Arc<dyn TaskRepositoryFactory>) -> Self {
        Self {
            fetcher: MetadataFetcher::new(agent),
            factory,
            launcher: TaskLauncher::new(),
        }
    }

    /// Starts `task_definition` on this node and waits for it to run
    pub async fn run(&self, task_definition: &str) -> Result<LaunchResult, BootstrapError> {
        if task_definition.trim().is_empty() {
            return Err(BootstrapError::Usage(
                "no task definition specified".to_string(),
            ));
        }

        info!("Fetching node metadata from the ECS agent");
        let raw = self.fetcher.fetch_metadata().await?;

        let identity = parse_metadata(&raw, self.factory.as_ref())?;
        info!(
            "Node {} in cluster {} ({})",
            identity.node_arn(),
            identity.cluster_name(),
            identity.region()
        );

        let request = LaunchRequest::new(task_definition, identity);
        let result = self.launcher.ensure_task_running(&request).await?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CLUSTER, MockAgent, MockTasks, RecordingFactory, valid_metadata};
    use ecs_bootstrap_core::domain::task::TaskHandle;

    #[tokio::test(start_paused = true)]
    async fn test_bootstraps_task() {
        let metadata = valid_metadata();
        let agent = Arc::new(MockAgent::new(move |_| {
            let (head, tail) = metadata.split_at(20);
            let body: Vec<ecs_bootstrap_client::Result<bytes::Bytes>> = vec![
                Ok(bytes::Bytes::copy_from_slice(head.as_bytes())),
                Ok(bytes::Bytes::copy_from_slice(tail.as_bytes())),
            ];
            Ok(ecs_bootstrap_client::AgentResponse::new(
                200,
                futures::stream::iter(body),
            ))
        }));
        let tasks = Arc::new(MockTasks::running("arn:aws:ecs:us-east-1:123456789012:task/abcd"));
        let factory = Arc::new(RecordingFactory::new(tasks.clone()));

        let bootstrapper = Bootstrapper::new(agent.clone(), factory.clone());
        let result = bootstrapper.run("my-task-definition").await.unwrap();

        assert_eq!(
            result.task_handle,
            TaskHandle::new("arn:aws:ecs:us-east-1:123456789012:task/abcd")
        );
        assert_eq!(agent.calls(), 1);
        assert_eq!(factory.regions(), vec!["us-east-1".to_string()]);
        assert_eq!(tasks.start_calls(), 1);
        assert_eq!(tasks.waited.lock().unwrap()[0].1, CLUSTER);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_metadata_stops_before_launch() {
        let agent = Arc::new(MockAgent::with_chunks(&["{\"Cluster\":\"c\"}"]));
        let tasks = Arc::new(MockTasks::running("abcd"));
        let factory = Arc::new(RecordingFactory::new(tasks.clone()));

        let err = Bootstrapper::new(agent.clone(), factory.clone())
            .run("my-task-definition")
            .await
            .unwrap_err();

        assert!(matches!(err, BootstrapError::Validation(_)));
        // Validation errors are not retried
        assert_eq!(agent.calls(), 1);
        assert!(factory.regions().is_empty());
        assert_eq!(tasks.start_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreachable_agent_is_fatal() {
        let agent = Arc::new(MockAgent::with_status(404));
        let tasks = Arc::new(MockTasks::running("abcd"));
        let factory = Arc::new(RecordingFactory::new(tasks.clone()));

        let err = Bootstrapper::new(agent, factory)
            .run("my-task-definition")
            .await
            .unwrap_err();

        assert!(matches!(err, BootstrapError::Connection(_)));
        assert_eq!(tasks.start_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_task_definition_is_rejected_before_io() {
        let agent = Arc::new(MockAgent::with_chunks(&["{}"]));
        let factory = Arc::new(RecordingFactory::new(Arc::new(MockTasks::running("abcd"))));

        let err = Bootstrapper::new(agent.clone(), factory)
            .run("  ")
            .await
            .unwrap_err();

        assert!(matches!(err, BootstrapError::Usage(_)));
        assert_eq!(err.to_string(), "no task definition specified");
        assert_eq!(agent.calls(), 0);
    }
}

//! ECS API client
//!
//! Thin wrapper over `aws-sdk-ecs` exposing the two calls the bootstrap
//! needs: placing a task on a container instance and waiting for it to run.

use aws_config::SdkConfig;
use aws_sdk_ecs::client::Waiters;
use aws_sdk_ecs::config::{BehaviorVersion, Region};
use aws_sdk_ecs::error::DisplayErrorContext;
use aws_sdk_ecs::operation::start_task::StartTaskOutput;
use ecs_bootstrap_core::domain::task::{Placement, PlacementFailure, StartTask, TaskHandle};
use std::time::Duration;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Region-bound client for the ECS API
#[derive(Debug, Clone)]
pub struct EcsClient {
    /// Region every request is sent to
    region: String,
    /// SDK client instance
    client: aws_sdk_ecs::Client,
}

impl EcsClient {
    /// Create a client bound to `region`
    ///
    /// Credentials, retry and timeout settings come from `sdk_config`; only
    /// the region is overridden.
    ///
    /// # Example
    /// ```no_run
    /// use ecs_bootstrap_client::EcsClient;
    ///
    /// # async fn example() {
    /// let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest()).load().await;
    /// let ecs = EcsClient::new(&sdk_config, "us-east-1");
    /// assert_eq!(ecs.region(), "us-east-1");
    /// # }
    /// ```
    pub fn new(sdk_config: &SdkConfig, region: impl Into<String>) -> Self {
        let region = region.into();
        let config = aws_sdk_ecs::config::Builder::from(sdk_config)
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region.clone()))
            .build();

        Self {
            region,
            client: aws_sdk_ecs::Client::from_conf(config),
        }
    }

    /// Get the region this client is bound to
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Start a task on specific container instances
    ///
    /// # Returns
    /// The placement answer: started task handles and/or failures
    pub async fn start_task(&self, req: &StartTask) -> Result<Placement> {
        if req.container_instances.is_empty() {
            return Err(ClientError::InvalidRequest(
                "at least one container instance is required".to_string(),
            ));
        }

        debug!(
            "StartTask {} on {} container instance(s) in cluster {}",
            req.task_definition,
            req.container_instances.len(),
            req.cluster
        );

        let output = self
            .client
            .start_task()
            .cluster(&req.cluster)
            .task_definition(&req.task_definition)
            .set_container_instances(Some(
                req.container_instances
                    .iter()
                    .map(|arn| arn.as_str().to_string())
                    .collect(),
            ))
            .started_by(&req.started_by)
            .send()
            .await
            .map_err(|e| ClientError::ecs("StartTask", DisplayErrorContext(&e).to_string()))?;

        Ok(placement_from_output(output))
    }

    /// Block until a task reaches the RUNNING state
    ///
    /// Polls DescribeTasks through the SDK waiter. Fails if the task stops,
    /// goes missing, or is still not running after `max_wait`.
    pub async fn wait_until_running(
        &self,
        task: &TaskHandle,
        cluster: &str,
        max_wait: Duration,
    ) -> Result<()> {
        debug!("Waiting for task {} in cluster {} to run", task, cluster);

        self.client
            .wait_until_tasks_running()
            .cluster(cluster)
            .tasks(task.as_str())
            .wait(max_wait)
            .await
            .map_err(|e| {
                ClientError::ecs("TasksRunning waiter", DisplayErrorContext(&e).to_string())
            })?;

        Ok(())
    }
}

/// Convert an SDK StartTask output into a placement answer
///
/// Tasks without an ARN are skipped.
pub fn placement_from_output(output: StartTaskOutput) -> Placement {
    let tasks = output
        .tasks
        .unwrap_or_default()
        .into_iter()
        .filter_map(|task| task.task_arn.map(TaskHandle::new))
        .collect();

    let failures = output
        .failures
        .unwrap_or_default()
        .into_iter()
        .map(|failure| PlacementFailure {
            arn: failure.arn,
            reason: failure.reason,
        })
        .collect();

    Placement { tasks, failures }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ecs::types::{Failure, Task};

    #[test]
    fn test_placement_from_started_tasks() {
        let output = StartTaskOutput::builder()
            .tasks(Task::builder().task_arn("abcd").build())
            .tasks(Task::builder().build())
            .build();

        let placement = placement_from_output(output);
        assert_eq!(placement.tasks, vec![TaskHandle::new("abcd")]);
        assert!(placement.failures.is_empty());
    }

    #[test]
    fn test_placement_from_failures() {
        let output = StartTaskOutput::builder()
            .failures(
                Failure::builder()
                    .arn("arn:aws:ecs:us-east-1:123456789012:container-instance/abc")
                    .reason("RESOURCE:MEMORY")
                    .build(),
            )
            .build();

        let placement = placement_from_output(output);
        assert!(placement.first_task().is_none());
        assert_eq!(placement.failure_reason(), "RESOURCE:MEMORY");
    }

    #[test]
    fn test_placement_from_empty_output() {
        let placement = placement_from_output(StartTaskOutput::builder().build());
        assert_eq!(placement, Placement::default());
    }

    #[tokio::test]
    async fn test_client_is_bound_to_region() {
        let sdk_config = SdkConfig::builder().build();
        let client = EcsClient::new(&sdk_config, "eu-west-1");
        assert_eq!(client.region(), "eu-west-1");
    }
}

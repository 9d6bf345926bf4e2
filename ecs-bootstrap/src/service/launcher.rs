//! Task launcher
//!
//! Places the task on the node and waits until the orchestrator reports it
//! RUNNING. A failure in either phase fails the whole attempt; the next
//! attempt starts over with a fresh placement.

use ecs_bootstrap_core::domain::task::{LaunchResult, StartTask, TaskHandle};
use ecs_bootstrap_core::retry::{RetryError, RetryPolicy, retry_with_fixed_delay};
use std::time::Duration;
use tracing::info;

use crate::error::LaunchError;
use crate::service::NodeIdentity;

/// Originator label attached to every placement request
pub const ORIGINATOR: &str = "ecs-bootstrap";

/// 10 attempts, 1 second apart
pub const TASK_LAUNCH_RETRY: RetryPolicy =
    RetryPolicy::fixed("Task launch", 10, Duration::from_millis(1000));

/// A task definition to run on an identified node
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    task_definition: String,
    identity: NodeIdentity,
}

impl LaunchRequest {
    pub fn new(task_definition: impl Into<String>, identity: NodeIdentity) -> Self {
        Self {
            task_definition: task_definition.into(),
            identity,
        }
    }

    pub fn task_definition(&self) -> &str {
        &self.task_definition
    }

    pub fn identity(&self) -> &NodeIdentity {
        &self.identity
    }

    /// The placement request for this launch
    fn start_task(&self) -> StartTask {
        StartTask {
            cluster: self.identity.cluster_name().to_string(),
            task_definition: self.task_definition.clone(),
            container_instances: vec![self.identity.node_arn().clone()],
            started_by: ORIGINATOR.to_string(),
        }
    }
}

/// Launches a task and confirms it runs
pub struct TaskLauncher {
    policy: RetryPolicy,
}

impl TaskLauncher {
    /// Creates a launcher using the fixed launch retry policy
    pub fn new() -> Self {
        Self {
            policy: TASK_LAUNCH_RETRY,
        }
    }

    /// Places the task and waits for it to run, retrying both phases together
    ///
    /// Returns the last attempt's error once every attempt has failed.
    pub async fn ensure_task_running(
        &self,
        request: &LaunchRequest,
    ) -> Result<LaunchResult, LaunchError> {
        // TODO: carry an already-placed handle across attempts so a failed
        // confirmation does not trigger a second placement.
        retry_with_fixed_delay(
            self.policy,
            |attempt| self.launch_once(request, attempt),
            |_| true,
        )
        .await
        .map_err(RetryError::into_inner)
    }

    async fn launch_once(
        &self,
        request: &LaunchRequest,
        attempt: u32,
    ) -> Result<LaunchResult, LaunchError> {
        info!(
            "Starting {} on {} (attempt {}/{})",
            request.task_definition(),
            request.identity().node_arn(),
            attempt,
            self.policy.max_attempts
        );

        let task_handle = self.place(request).await?;
        self.confirm(request, &task_handle).await?;

        info!("Task {} is running", task_handle);
        Ok(LaunchResult { task_handle })
    }

    async fn place(&self, request: &LaunchRequest) -> Result<TaskHandle, LaunchError> {
        let placement = request
            .identity()
            .tasks()
            .start_task(&request.start_task())
            .await
            .map_err(LaunchError::Placement)?;

        match placement.first_task() {
            Some(task) => Ok(task.clone()),
            None => Err(LaunchError::Rejected {
                reason: placement.failure_reason().to_string(),
            }),
        }
    }

    async fn confirm(&self, request: &LaunchRequest, task: &TaskHandle) -> Result<(), LaunchError> {
        let identity = request.identity();
        identity
            .tasks()
            .wait_until_running(task, identity.cluster_name())
            .await
            .map_err(|source| LaunchError::Confirmation {
                task: task.clone(),
                source,
            })
    }
}

impl Default for TaskLauncher {
    fn default() -> Self {
        Self::new()
    }
}

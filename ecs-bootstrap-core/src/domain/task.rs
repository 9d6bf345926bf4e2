//! Task domain types

use serde::{Deserialize, Serialize};

use crate::domain::instance::ContainerInstanceArn;

/// Reason reported when the orchestrator places nothing and gives no failure
pub const DEFAULT_PLACEMENT_FAILURE: &str = "Failed to start task";

/// Handle of a placed task (its task ARN)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskHandle(String);

impl TaskHandle {
    pub fn new(arn: impl Into<String>) -> Self {
        Self(arn.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request to place a task on a specific container instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartTask {
    /// Cluster the container instance is registered with
    pub cluster: String,

    /// Task definition (family, family:revision or full ARN)
    pub task_definition: String,

    /// Container instances to place the task on
    pub container_instances: Vec<ContainerInstanceArn>,

    /// Originator label attached to the task
    pub started_by: String,
}

/// A single placement failure reported by the orchestrator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementFailure {
    /// Resource the failure refers to
    pub arn: Option<String>,

    /// Human-readable reason
    pub reason: Option<String>,
}

/// The orchestrator's answer to a placement request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub tasks: Vec<TaskHandle>,
    pub failures: Vec<PlacementFailure>,
}

impl Placement {
    /// The first task that was placed, if any
    pub fn first_task(&self) -> Option<&TaskHandle> {
        self.tasks.first()
    }

    /// Reason to report when nothing was placed
    ///
    /// Uses the first failure's reason, falling back to
    /// [`DEFAULT_PLACEMENT_FAILURE`].
    pub fn failure_reason(&self) -> &str {
        self.failures
            .first()
            .and_then(|failure| failure.reason.as_deref())
            .unwrap_or(DEFAULT_PLACEMENT_FAILURE)
    }
}

/// Outcome of a successful launch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchResult {
    pub task_handle: TaskHandle,
}

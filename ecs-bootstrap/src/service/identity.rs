//! Node identity
//!
//! Turns the agent's metadata document into the identity of the node the
//! task will be placed on, together with an orchestrator client bound to the
//! node's region. Malformed metadata does not fix itself, so nothing here is
//! retried.

use ecs_bootstrap_core::domain::instance::ContainerInstanceArn;
use ecs_bootstrap_core::dto::agent::AgentMetadata;
use std::sync::Arc;

use crate::error::ValidationError;
use crate::repository::{TaskRepository, TaskRepositoryFactory};

/// Identity of the node the bootstrap runs on
///
/// Immutable once built. The orchestrator handle is always bound to the
/// region embedded in `node_arn`.
#[derive(Clone)]
pub struct NodeIdentity {
    node_arn: ContainerInstanceArn,
    cluster_name: String,
    tasks: Arc<dyn TaskRepository>,
}

impl NodeIdentity {
    /// Builds an identity and its region-bound orchestrator client
    pub fn new(
        node_arn: ContainerInstanceArn,
        cluster_name: impl Into<String>,
        factory: &dyn TaskRepositoryFactory,
    ) -> Self {
        let tasks = factory.for_region(node_arn.region());
        Self {
            node_arn,
            cluster_name: cluster_name.into(),
            tasks,
        }
    }

    pub fn node_arn(&self) -> &ContainerInstanceArn {
        &self.node_arn
    }

    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    pub fn region(&self) -> &str {
        self.node_arn.region()
    }

    /// Orchestrator client bound to [`Self::region`]
    pub fn tasks(&self) -> &Arc<dyn TaskRepository> {
        &self.tasks
    }
}

impl std::fmt::Debug for NodeIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeIdentity")
            .field("node_arn", &self.node_arn)
            .field("cluster_name", &self.cluster_name)
            .field("region", &self.region())
            .finish_non_exhaustive()
    }
}

/// Parses the agent metadata document into a [`NodeIdentity`]
///
/// Requires valid JSON with a non-empty `ContainerInstanceArn` that carries
/// a region segment, and a non-empty `Cluster`. The orchestrator client is
/// only constructed once every check has passed.
pub fn parse_metadata(
    raw: &str,
    factory: &dyn TaskRepositoryFactory,
) -> Result<NodeIdentity, ValidationError> {
    let metadata: AgentMetadata = serde_json::from_str(raw)?;

    let node_arn = metadata
        .container_instance_arn
        .filter(|arn| !arn.is_empty())
        .ok_or(ValidationError::MissingArn)?;
    let node_arn = ContainerInstanceArn::parse(node_arn)?;

    let cluster_name = metadata
        .cluster
        .filter(|cluster| !cluster.is_empty())
        .ok_or(ValidationError::MissingCluster)?;

    Ok(NodeIdentity::new(node_arn, cluster_name, factory))
}

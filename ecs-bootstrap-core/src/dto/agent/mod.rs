//! ECS agent DTOs
//!
//! Payload served by the agent's introspection endpoint (`/v1/metadata`).

use serde::{Deserialize, Serialize};

/// Node metadata reported by the local ECS agent
///
/// Every field is optional on the wire; presence is enforced by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AgentMetadata {
    /// Name of the cluster the node is registered with
    pub cluster: Option<String>,

    /// ARN of this node's container instance
    pub container_instance_arn: Option<String>,

    /// Agent version string
    pub version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_agent_payload() {
        let json = r#"{
            "Cluster": "ecs-cluster-testing",
            "ContainerInstanceArn": "arn:aws:ecs:us-east-1:123456789012:container-instance/abc",
            "Version": "Amazon ECS Agent - v1.51.0",
            "ContainerInstanceTags": {}
        }"#;

        let metadata: AgentMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(metadata.cluster.as_deref(), Some("ecs-cluster-testing"));
        assert_eq!(
            metadata.container_instance_arn.as_deref(),
            Some("arn:aws:ecs:us-east-1:123456789012:container-instance/abc")
        );
        assert_eq!(metadata.version.as_deref(), Some("Amazon ECS Agent - v1.51.0"));
    }

    #[test]
    fn test_missing_fields_are_none() {
        let metadata: AgentMetadata = serde_json::from_str("{}").unwrap();
        assert_eq!(metadata, AgentMetadata::default());
    }
}

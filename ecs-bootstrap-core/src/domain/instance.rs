//! Container instance domain model
//!
//! A container instance is a node registered with an ECS cluster. Its ARN is
//! the only identity the local agent reports, and the region the node lives
//! in is embedded in it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while validating a container instance ARN
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArnError {
    /// The ARN string was empty
    #[error("container instance ARN is empty")]
    Empty,

    /// The ARN does not carry a region segment
    #[error("container instance ARN has no region segment: {0}")]
    MissingRegion(String),
}

/// A validated container instance ARN
///
/// ARNs are colon-delimited: `arn:partition:service:region:account:resource`.
/// Construction guarantees that the region segment (index 3) is present and
/// non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContainerInstanceArn(String);

impl ContainerInstanceArn {
    /// Parses and validates an ARN string
    pub fn parse(arn: impl Into<String>) -> Result<Self, ArnError> {
        let arn = arn.into();
        if arn.is_empty() {
            return Err(ArnError::Empty);
        }

        match arn.split(':').nth(3) {
            Some(region) if !region.is_empty() => Ok(Self(arn)),
            _ => Err(ArnError::MissingRegion(arn)),
        }
    }

    /// The region segment of the ARN
    pub fn region(&self) -> &str {
        // validated in `parse`
        self.0.split(':').nth(3).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContainerInstanceArn {
    type Error = ArnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ContainerInstanceArn> for String {
    fn from(arn: ContainerInstanceArn) -> Self {
        arn.0
    }
}

impl std::fmt::Display for ContainerInstanceArn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

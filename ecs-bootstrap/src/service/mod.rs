//! Service layer
//!
//! Services contain the bootstrap's business logic. They drive the
//! repositories and implement the three stages of the workflow:
//! fetching agent metadata, turning it into a node identity, and launching
//! the task on that node.

mod identity;
mod launcher;
mod metadata;

pub use identity::{NodeIdentity, parse_metadata};
pub use launcher::{LaunchRequest, TaskLauncher};
pub use metadata::MetadataFetcher;

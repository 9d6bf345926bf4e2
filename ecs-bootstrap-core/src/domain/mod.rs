//! Core domain types
//!
//! These types describe the node a task is bootstrapped onto and the
//! placement answers the orchestrator hands back. They are shared between
//! the client crate (which converts SDK payloads into them) and the binary
//! (which drives the bootstrap workflow).

pub mod instance;
pub mod task;

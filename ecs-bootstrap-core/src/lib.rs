//! ECS Bootstrap Core
//!
//! Core types and abstractions shared by the bootstrap client and binary.
//!
//! This crate contains:
//! - Domain types: container instance ARNs, task placement and task handles
//! - DTOs: the payload served by the local ECS agent
//! - Retry: the fixed-delay retry combinator used by both bootstrap loops

pub mod domain;
pub mod dto;
pub mod retry;

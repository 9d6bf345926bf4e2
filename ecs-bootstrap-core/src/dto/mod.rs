//! Data Transfer Objects
//!
//! Wire representations of payloads exchanged with external services. DTOs
//! stay close to the wire format; validation happens when they are turned
//! into domain types.

pub mod agent;

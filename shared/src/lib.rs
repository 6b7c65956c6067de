//! Shared module for the account service
//!
//! Cross-layer types used by the core, infrastructure, and API crates:
//! configuration structs, pagination, and the error response envelope.

pub mod config;
pub mod types;

//! Request-level error handling

pub mod error;

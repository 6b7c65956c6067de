//! Command and query handlers (use cases)

pub mod users;

//! Shared type definitions

pub mod pagination;
pub mod response;

pub use pagination::Pagination;
pub use response::{ErrorEnvelope, ErrorMessage};

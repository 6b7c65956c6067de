//! Request and response DTOs.

pub mod user;

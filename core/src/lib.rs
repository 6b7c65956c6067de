//! Core domain layer for the account service
//!
//! This crate holds everything the HTTP and persistence layers agree on:
//! the domain entities, the error taxonomy, the repository traits, the
//! transaction coordinator, and the command/query handlers. It has no
//! knowledge of actix-web or sqlx; those live in the `api` and `infra`
//! crates respectively.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod transaction;
pub mod use_cases;

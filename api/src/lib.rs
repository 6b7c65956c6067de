//! HTTP API layer for the account service
//!
//! actix-web routes and DTOs over the core command/query handlers, plus
//! the error-normalizing middleware that turns every failure into a
//! stable response envelope.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

//! Configuration modules for the account service

pub mod database;
pub mod server;

use serde::{Deserialize, Serialize};

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Top-level application configuration, assembled from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Load all configuration sections from the environment.
    ///
    /// Missing variables fall back to development defaults; this never fails.
    pub fn from_env() -> Self {
        Config {
            database: DatabaseConfig::from_env(),
            server: ServerConfig::from_env(),
        }
    }
}

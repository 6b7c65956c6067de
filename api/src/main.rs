//! Account service entrypoint
//!
//! Loads configuration from the environment, connects to Postgres, runs
//! pending migrations, and serves the HTTP API.

use std::sync::Arc;

use actix_web::{web, HttpServer};
use tracing_subscriber::EnvFilter;

use account_api::app::{create_app, AppState};
use account_infra::{DatabasePool, PgTransactionManager, PgUserQueryRepository, PgUserRepository};
use account_shared::config::Config;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    let database = DatabasePool::new(&config.database).await?;
    database.migrate().await?;

    let repository = Arc::new(PgUserRepository::new());
    let tx_manager = Arc::new(PgTransactionManager::new(database.pool().clone()));
    let query_repository = Arc::new(PgUserQueryRepository::new(database.pool().clone()));

    let app_state = web::Data::new(AppState::new(repository, tx_manager, query_repository));

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "starting account service");

    HttpServer::new(move || create_app(app_state.clone()))
        .bind(&bind_address)?
        .run()
        .await?;

    Ok(())
}

//! CORS middleware configuration.
//!
//! Environment-aware: permissive in development, restricted to the
//! origins named in `ALLOWED_ORIGINS` in production.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use std::env;

const DEFAULT_MAX_AGE: usize = 3600;

/// Creates a CORS middleware instance configured for the current
/// environment.
///
/// Set `ENVIRONMENT=production` together with a comma-separated
/// `ALLOWED_ORIGINS` list to lock origins down; anything else gets the
/// permissive development configuration.
pub fn create_cors() -> Cors {
    let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    let max_age = env::var("CORS_MAX_AGE")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_AGE);

    if environment == "production" {
        create_production_cors(max_age)
    } else {
        create_development_cors(max_age)
    }
}

fn create_development_cors(max_age: usize) -> Cors {
    tracing::info!("configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
        ])
        .max_age(max_age)
}

fn create_production_cors(max_age: usize) -> Cors {
    tracing::info!("configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(max_age);

    if let Ok(allowed_origins) = env::var("ALLOWED_ORIGINS") {
        for origin in allowed_origins.split(',').map(str::trim) {
            if !origin.is_empty() {
                tracing::info!(origin, "adding allowed origin");
                cors = cors.allowed_origin(origin);
            }
        }
    }

    cors
}

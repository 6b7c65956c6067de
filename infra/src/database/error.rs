//! Mapping sqlx errors to the domain error taxonomy
//!
//! Database failures surface as Infrastructure faults. Constraint
//! violations keep a client-visible 4xx status; everything else is a
//! server-side failure whose detail only reaches the logs. Diagnostic
//! fields from the Postgres error (code, detail, constraint, table,
//! column) are copied into the fault's info payload so the error
//! normalizer can log them.

use serde_json::{Map, Value};
use sqlx::error::ErrorKind as SqlxErrorKind;
use sqlx::postgres::PgDatabaseError;

use account_core::errors::{AppError, InfrastructureError};

/// Convert a sqlx error into an Infrastructure fault.
pub fn map_sqlx_error(error: sqlx::Error) -> AppError {
    match &error {
        sqlx::Error::Database(db) => {
            let message = db.message().to_string();
            let fault = match db.kind() {
                SqlxErrorKind::UniqueViolation => InfrastructureError::conflict(message),
                SqlxErrorKind::ForeignKeyViolation => InfrastructureError::conflict(message),
                SqlxErrorKind::NotNullViolation | SqlxErrorKind::CheckViolation => {
                    InfrastructureError::bad_request(message)
                }
                _ => InfrastructureError::internal_server_error(message),
            };

            let info = diagnostic_info(db.as_ref());
            if info.is_empty() {
                fault
            } else {
                fault.with_info(Value::Object(info))
            }
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            InfrastructureError::service_unavailable(error.to_string())
        }
        sqlx::Error::RowNotFound => InfrastructureError::not_found(error.to_string()),
        _ => InfrastructureError::internal_server_error(error.to_string()),
    }
}

/// Collect the fixed allow-list of diagnostic fields present on the
/// database error.
fn diagnostic_info(db: &dyn sqlx::error::DatabaseError) -> Map<String, Value> {
    let mut info = Map::new();

    if let Some(code) = db.code() {
        info.insert("code".to_string(), Value::String(code.into_owned()));
    }
    if let Some(constraint) = db.constraint() {
        info.insert("constraint".to_string(), Value::String(constraint.to_string()));
    }
    if let Some(table) = db.table() {
        info.insert("table".to_string(), Value::String(table.to_string()));
    }

    // detail and column are Postgres-specific.
    if let Some(pg) = db.try_downcast_ref::<PgDatabaseError>() {
        if let Some(detail) = pg.detail() {
            info.insert("detail".to_string(), Value::String(detail.to_string()));
        }
        if let Some(column) = pg.column() {
            info.insert("column".to_string(), Value::String(column.to_string()));
        }
    }

    info
}

//! Error taxonomy for the account service
//!
//! All failures surfacing from request handling are one of four kinds:
//! Domain (business-rule violations), UseCase (application-layer
//! violations), Presentation (request-shape violations), and
//! Infrastructure (downstream dependency failures). Every fault carries a
//! message, an HTTP status code, and an optional structured info payload.
//!
//! Faults are never caught and discarded on the way up; the API layer's
//! error normalizer is the single point where they become HTTP responses.

use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

mod status {
    pub const BAD_REQUEST: u16 = 400;
    pub const UNAUTHORIZED: u16 = 401;
    pub const FORBIDDEN: u16 = 403;
    pub const NOT_FOUND: u16 = 404;
    pub const CONFLICT: u16 = 409;
    pub const UNPROCESSABLE_ENTITY: u16 = 422;
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
    pub const SERVICE_UNAVAILABLE: u16 = 503;
}

/// The layer a fault originated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Domain,
    UseCase,
    Presentation,
    Infrastructure,
}

impl ErrorKind {
    /// Kind name as it appears in the `error` field of the response
    /// envelope.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Domain => "DomainError",
            ErrorKind::UseCase => "UseCaseError",
            ErrorKind::Presentation => "PresentationError",
            ErrorKind::Infrastructure => "InfrastructureError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed application fault.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} ({status_code}): {message}")]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    pub status_code: u16,
    pub info: Option<Map<String, Value>>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code,
            info: None,
        }
    }

    /// Attach a structured info payload. Non-object values are wrapped
    /// under a `value` key so the payload always serializes as a mapping.
    pub fn with_info(mut self, info: Value) -> Self {
        self.info = Some(match info {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        });
        self
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code >= 500
    }
}

/// Business-rule violations.
pub struct DomainError;

impl DomainError {
    pub fn bad_request(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::Domain, message, status::BAD_REQUEST)
    }

    pub fn not_found(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::Domain, message, status::NOT_FOUND)
    }

    pub fn conflict(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::Domain, message, status::CONFLICT)
    }

    pub fn unprocessable_entity(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::Domain, message, status::UNPROCESSABLE_ENTITY)
    }

    pub fn internal_server_error(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::Domain, message, status::INTERNAL_SERVER_ERROR)
    }
}

/// Application-layer violations, e.g. bad input reaching a handler.
pub struct UseCaseError;

impl UseCaseError {
    pub fn bad_request(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::UseCase, message, status::BAD_REQUEST)
    }

    pub fn unauthorized(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::UseCase, message, status::UNAUTHORIZED)
    }

    pub fn forbidden(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::UseCase, message, status::FORBIDDEN)
    }

    pub fn not_found(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::UseCase, message, status::NOT_FOUND)
    }

    pub fn conflict(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::UseCase, message, status::CONFLICT)
    }

    pub fn unprocessable_entity(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::UseCase, message, status::UNPROCESSABLE_ENTITY)
    }

    pub fn internal_server_error(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::UseCase, message, status::INTERNAL_SERVER_ERROR)
    }
}

/// Request-shape violations raised by the presentation layer.
pub struct PresentationError;

impl PresentationError {
    pub fn bad_request(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::Presentation, message, status::BAD_REQUEST)
    }

    pub fn unauthorized(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::Presentation, message, status::UNAUTHORIZED)
    }

    pub fn forbidden(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::Presentation, message, status::FORBIDDEN)
    }

    pub fn not_found(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::Presentation, message, status::NOT_FOUND)
    }

    pub fn conflict(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::Presentation, message, status::CONFLICT)
    }

    pub fn unprocessable_entity(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::Presentation, message, status::UNPROCESSABLE_ENTITY)
    }

    pub fn internal_server_error(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::Presentation, message, status::INTERNAL_SERVER_ERROR)
    }
}

/// Downstream dependency failures, e.g. the database being unavailable.
pub struct InfrastructureError;

impl InfrastructureError {
    pub fn bad_request(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::Infrastructure, message, status::BAD_REQUEST)
    }

    pub fn not_found(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::Infrastructure, message, status::NOT_FOUND)
    }

    pub fn conflict(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::Infrastructure, message, status::CONFLICT)
    }

    pub fn internal_server_error(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::Infrastructure, message, status::INTERNAL_SERVER_ERROR)
    }

    pub fn service_unavailable(message: impl Into<String>) -> AppError {
        AppError::new(ErrorKind::Infrastructure, message, status::SERVICE_UNAVAILABLE)
    }
}

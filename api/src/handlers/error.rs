//! Error classification and normalization
//!
//! Every failure surfacing from request handling is classified into a
//! status, message, and error-kind name; shaped into a detailed envelope
//! (logs) and a client envelope (response); logged once; and re-raised as
//! a single normalized `ApiError`. Classification is total: foreign
//! values that are not errors at all fall back to a generic 500.
//!
//! The pipeline never leaks internals for server-side failures: the
//! client envelope for any status >= 500 carries the fixed generic
//! message and no info payload.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::{Map, Value};

use account_core::errors::AppError;
use account_shared::types::response::{
    ErrorEnvelope, ErrorMessage, INTERNAL_SERVER_ERROR_KIND, INTERNAL_SERVER_ERROR_MESSAGE,
};

/// Diagnostic fields copied from a fault into the log context, when
/// present. Nothing outside this list is ever attached.
const CONTEXT_FIELDS: [&str; 6] = ["code", "detail", "constraint", "table", "column", "name"];

/// A fault as it surfaced from request handling, before normalization.
#[derive(Debug)]
pub enum Raised {
    /// A typed fault from the application taxonomy.
    App(AppError),
    /// A framework-level HTTP fault that knows its own status.
    Http(HttpFault),
    /// Any other error value.
    Generic(GenericFault),
    /// A foreign value that is not an error at all.
    Other(Value),
}

#[derive(Debug)]
pub struct HttpFault {
    pub status: StatusCode,
    /// Type name of the fault, used as the kind fallback.
    pub name: String,
    pub body: HttpFaultBody,
}

#[derive(Debug)]
pub enum HttpFaultBody {
    Text(String),
    Structured {
        message: Option<ErrorMessage>,
        error: Option<String>,
    },
}

impl HttpFault {
    pub fn text(status: StatusCode, name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            name: name.into(),
            body: HttpFaultBody::Text(body.into()),
        }
    }

    pub fn structured(
        status: StatusCode,
        name: impl Into<String>,
        message: Option<ErrorMessage>,
        error: Option<String>,
    ) -> Self {
        Self {
            status,
            name: name.into(),
            body: HttpFaultBody::Structured { message, error },
        }
    }
}

/// An untyped error value: message, reported type name, one level of
/// unwrapped cause, and any diagnostic context it carried.
#[derive(Debug)]
pub struct GenericFault {
    pub message: String,
    pub name: String,
    pub cause: Option<String>,
    pub context: Option<Map<String, Value>>,
}

impl GenericFault {
    pub fn new(message: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            name: name.into(),
            cause: None,
            context: None,
        }
    }

    /// Capture a typed error: its message, its short type name, and one
    /// level of source unwrapping for the log headline.
    pub fn from_error<E: std::error::Error>(error: &E) -> Self {
        Self {
            message: error.to_string(),
            name: short_type_name::<E>(),
            cause: error.source().map(|source| source.to_string()),
            context: None,
        }
    }

    pub fn with_context(mut self, context: Map<String, Value>) -> Self {
        self.context = Some(context);
        self
    }
}

fn short_type_name<E>() -> String {
    std::any::type_name::<E>()
        .rsplit("::")
        .next()
        .unwrap_or("Error")
        .to_string()
}

/// The outcome of classification: everything needed to shape both
/// envelope variants.
#[derive(Debug, Clone)]
pub struct Classified {
    pub status: StatusCode,
    pub message: ErrorMessage,
    pub kind: String,
    pub info: Option<Map<String, Value>>,
}

/// Classify a raised fault. Pure and total: never fails, never panics.
pub fn classify(raised: &Raised) -> Classified {
    match raised {
        Raised::App(error) => Classified {
            status: StatusCode::from_u16(error.status_code)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            message: error.message.clone().into(),
            kind: error.kind_name().to_string(),
            info: error.info.clone(),
        },
        Raised::Http(fault) => match &fault.body {
            HttpFaultBody::Text(text) => Classified {
                status: fault.status,
                message: text.clone().into(),
                kind: fault.name.clone(),
                info: None,
            },
            HttpFaultBody::Structured { message, error } => Classified {
                status: fault.status,
                message: message
                    .clone()
                    .unwrap_or_else(|| INTERNAL_SERVER_ERROR_MESSAGE.into()),
                kind: error.clone().unwrap_or_else(|| fault.name.clone()),
                info: None,
            },
        },
        Raised::Generic(fault) => Classified {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: fault.message.clone().into(),
            kind: fault.name.clone(),
            info: None,
        },
        Raised::Other(_) => Classified {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: INTERNAL_SERVER_ERROR_MESSAGE.into(),
            kind: INTERNAL_SERVER_ERROR_KIND.to_string(),
            info: None,
        },
    }
}

impl Classified {
    /// Full envelope for the logs.
    pub fn detailed_envelope(&self, path: &str) -> ErrorEnvelope {
        ErrorEnvelope::detailed(
            self.status.as_u16(),
            self.message.clone(),
            self.kind.clone(),
            path,
            self.info.clone(),
        )
    }

    /// Sanitized envelope for the client.
    pub fn client_envelope(&self, path: &str) -> ErrorEnvelope {
        ErrorEnvelope::client(
            self.status.as_u16(),
            self.message.clone(),
            self.kind.clone(),
            path,
            self.info.clone(),
        )
    }
}

/// Best-effort root cause for the log headline: one level of nested
/// cause when available, otherwise the stringified value itself.
pub fn root_cause(raised: &Raised) -> String {
    match raised {
        Raised::App(error) => error.message.clone(),
        Raised::Http(fault) => match &fault.body {
            HttpFaultBody::Text(text) => text.clone(),
            HttpFaultBody::Structured { message, .. } => message
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| fault.name.clone()),
        },
        Raised::Generic(fault) => fault
            .cause
            .clone()
            .unwrap_or_else(|| fault.message.clone()),
        Raised::Other(value) => match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        },
    }
}

/// Diagnostic context for the log record: the allow-listed fields
/// present on the fault, or nothing at all.
pub fn diagnostic_context(raised: &Raised) -> Option<Map<String, Value>> {
    let source = match raised {
        Raised::App(error) => error.info.as_ref(),
        Raised::Generic(fault) => fault.context.as_ref(),
        _ => None,
    }?;

    let mut context = Map::new();
    for field in CONTEXT_FIELDS {
        if let Some(value) = source.get(field) {
            if !value.is_null() {
                context.insert(field.to_string(), value.clone());
            }
        }
    }

    if context.is_empty() {
        None
    } else {
        Some(context)
    }
}

/// Classify, shape, log once, and produce the normalized fault that
/// replaces the original for anything further upstream.
pub fn normalize(raised: &Raised, path: &str) -> ApiError {
    let classified = classify(raised);
    let detailed = classified.detailed_envelope(path);
    let client = classified.client_envelope(path);

    let root = root_cause(raised);
    let detailed_json =
        serde_json::to_string(&detailed).unwrap_or_else(|_| detailed.error.clone());
    let client_json = serde_json::to_string(&client).unwrap_or_else(|_| client.error.clone());

    match diagnostic_context(raised) {
        Some(context) => tracing::error!(
            root_cause = %root,
            detailed = %detailed_json,
            client = %client_json,
            context = %serde_json::Value::Object(context),
            "request failed"
        ),
        None => tracing::error!(
            root_cause = %root,
            detailed = %detailed_json,
            client = %client_json,
            "request failed"
        ),
    }

    ApiError {
        status: classified.status,
        body: client,
    }
}

/// The normalized HTTP fault: classified status, client envelope body.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorEnvelope,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.status.as_u16(), self.body.error, self.body.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(&self.body)
    }
}

/// Wrapper letting taxonomy faults travel through actix untouched until
/// the normalizer sees them.
#[derive(Debug, Clone)]
pub struct RaisedError(pub AppError);

impl From<AppError> for RaisedError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl std::fmt::Display for RaisedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl ResponseError for RaisedError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    // Fallback rendering for apps running without the normalizer
    // middleware; the envelope is still sanitized, only unlogged.
    fn error_response(&self) -> HttpResponse {
        let classified = classify(&Raised::App(self.0.clone()));
        let body = classified.client_envelope("");
        HttpResponse::build(classified.status).json(&body)
    }
}

impl Raised {
    /// Map an actix error back to its raised shape via downcasting.
    pub fn from_actix(error: &actix_web::Error) -> Raised {
        use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError, UrlencodedError};

        if let Some(raised) = error.as_error::<RaisedError>() {
            return Raised::App(raised.0.clone());
        }
        if let Some(api) = error.as_error::<ApiError>() {
            return Raised::Http(HttpFault::structured(
                api.status,
                "ApiError",
                Some(api.body.message.clone()),
                Some(api.body.error.clone()),
            ));
        }
        if let Some(payload) = error.as_error::<JsonPayloadError>() {
            return Raised::Http(HttpFault::text(
                payload.status_code(),
                "JsonPayloadError",
                payload.to_string(),
            ));
        }
        if let Some(query) = error.as_error::<QueryPayloadError>() {
            return Raised::Http(HttpFault::text(
                query.status_code(),
                "QueryPayloadError",
                query.to_string(),
            ));
        }
        if let Some(path) = error.as_error::<PathError>() {
            return Raised::Http(HttpFault::text(
                path.status_code(),
                "PathError",
                path.to_string(),
            ));
        }
        if let Some(form) = error.as_error::<UrlencodedError>() {
            return Raised::Http(HttpFault::text(
                form.status_code(),
                "UrlencodedError",
                form.to_string(),
            ));
        }

        // Some other framework fault that knows its own (non-500) status.
        let status = error.as_response_error().status_code();
        if status != StatusCode::INTERNAL_SERVER_ERROR {
            return Raised::Http(HttpFault::text(status, "HttpError", error.to_string()));
        }

        Raised::Generic(GenericFault::new(error.to_string(), "Error"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use account_core::errors::{DomainError, InfrastructureError, PresentationError};
    use serde_json::json;

    // Classification table, row by row.

    #[test]
    fn classifies_taxonomy_faults_by_their_own_fields() {
        let raised = Raised::App(
            DomainError::not_found("User not found").with_info(json!({"userId": 123})),
        );
        let classified = classify(&raised);

        assert_eq!(classified.status, StatusCode::NOT_FOUND);
        assert_eq!(classified.message, "User not found".into());
        assert_eq!(classified.kind, "DomainError");
        assert_eq!(classified.info.unwrap()["userId"], 123);
    }

    #[test]
    fn classifies_http_fault_with_text_body() {
        let raised = Raised::Http(HttpFault::text(
            StatusCode::BAD_REQUEST,
            "JsonPayloadError",
            "Json deserialize error",
        ));
        let classified = classify(&raised);

        assert_eq!(classified.status, StatusCode::BAD_REQUEST);
        assert_eq!(classified.message, "Json deserialize error".into());
        assert_eq!(classified.kind, "JsonPayloadError");
    }

    #[test]
    fn classifies_http_fault_with_structured_body() {
        let raised = Raised::Http(HttpFault::structured(
            StatusCode::UNPROCESSABLE_ENTITY,
            "HttpError",
            Some(vec!["name must not be empty".to_string()].into()),
            Some("ValidationError".to_string()),
        ));
        let classified = classify(&raised);

        assert_eq!(classified.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            classified.message,
            vec!["name must not be empty".to_string()].into()
        );
        assert_eq!(classified.kind, "ValidationError");
    }

    #[test]
    fn structured_body_falls_back_to_defaults() {
        let raised = Raised::Http(HttpFault::structured(
            StatusCode::BAD_GATEWAY,
            "HttpError",
            None,
            None,
        ));
        let classified = classify(&raised);

        assert_eq!(classified.message, INTERNAL_SERVER_ERROR_MESSAGE.into());
        assert_eq!(classified.kind, "HttpError");
    }

    #[test]
    fn classifies_generic_faults_as_500_with_their_message() {
        let raised = Raised::Generic(GenericFault::new("Database connection failed", "IoError"));
        let classified = classify(&raised);

        assert_eq!(classified.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(classified.message, "Database connection failed".into());
        assert_eq!(classified.kind, "IoError");
    }

    #[test]
    fn foreign_values_all_classify_to_the_generic_500() {
        for value in [json!("boom"), json!(42), Value::Null, json!({"a": 1})] {
            let classified = classify(&Raised::Other(value));
            assert_eq!(classified.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(classified.message, INTERNAL_SERVER_ERROR_MESSAGE.into());
            assert_eq!(classified.kind, INTERNAL_SERVER_ERROR_KIND);
        }
    }

    // Envelope shaping.

    #[test]
    fn client_envelope_keeps_info_below_500() {
        // Scenario: DomainError::not_found with info on /users/123.
        let raised = Raised::App(
            DomainError::not_found("User not found").with_info(json!({"userId": 123})),
        );
        let client = classify(&raised).client_envelope("/users/123");

        assert_eq!(client.status_code, 404);
        assert_eq!(client.message, "User not found".into());
        assert_eq!(client.error, "DomainError");
        assert_eq!(client.path, "/users/123");
        assert_eq!(client.info.unwrap()["userId"], 123);
    }

    #[test]
    fn client_envelope_never_contains_info_at_or_above_500() {
        let raised = Raised::App(
            InfrastructureError::internal_server_error("connection refused")
                .with_info(json!({"code": "57P01"})),
        );
        let classified = classify(&raised);

        let detailed = classified.detailed_envelope("/users");
        assert!(detailed.info.is_some());
        assert_eq!(detailed.message, "connection refused".into());

        let client = classified.client_envelope("/users");
        assert!(client.info.is_none());
        assert_eq!(client.message, INTERNAL_SERVER_ERROR_MESSAGE.into());
        assert_eq!(client.error, INTERNAL_SERVER_ERROR_KIND);
    }

    // Root cause and context extraction.

    #[test]
    fn root_cause_prefers_the_unwrapped_source() {
        #[derive(Debug, thiserror::Error)]
        #[error("query failed")]
        struct QueryError {
            #[source]
            source: std::io::Error,
        }

        let error = QueryError {
            source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
        };
        let fault = GenericFault::from_error(&error);
        assert_eq!(fault.name, "QueryError");

        let raised = Raised::Generic(fault);
        assert_eq!(root_cause(&raised), "connection refused");
    }

    #[test]
    fn root_cause_stringifies_foreign_values() {
        assert_eq!(root_cause(&Raised::Other(json!("oops"))), "oops");
        assert_eq!(root_cause(&Raised::Other(json!(42))), "42");
        assert_eq!(root_cause(&Raised::Other(Value::Null)), "null");
    }

    #[test]
    fn context_copies_only_allow_listed_fields() {
        let raised = Raised::App(
            InfrastructureError::conflict("duplicate key").with_info(json!({
                "code": "23505",
                "constraint": "users_email_key",
                "table": "users",
                "rows_affected": 1,
                "detail": null,
            })),
        );

        let context = diagnostic_context(&raised).unwrap();
        assert_eq!(context["code"], "23505");
        assert_eq!(context["constraint"], "users_email_key");
        assert_eq!(context["table"], "users");
        // Not allow-listed, and null values are skipped.
        assert!(context.get("rows_affected").is_none());
        assert!(context.get("detail").is_none());
    }

    #[test]
    fn context_is_absent_when_nothing_matches() {
        let raised = Raised::App(DomainError::bad_request("bad"));
        assert!(diagnostic_context(&raised).is_none());

        let raised = Raised::Other(json!("boom"));
        assert!(diagnostic_context(&raised).is_none());
    }

    // Re-raise.

    #[test]
    fn normalize_carries_the_client_envelope_and_classified_status() {
        let raised = Raised::App(
            InfrastructureError::internal_server_error("Database connection failed")
                .with_info(json!({"code": "08006"})),
        );
        let api_error = normalize(&raised, "/users");

        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.body.message, INTERNAL_SERVER_ERROR_MESSAGE.into());
        assert_eq!(api_error.body.error, INTERNAL_SERVER_ERROR_KIND);
        assert_eq!(api_error.body.path, "/users");
        assert!(api_error.body.info.is_none());
    }

    #[test]
    fn normalize_is_idempotent_over_its_own_output() {
        let first = normalize(&Raised::Other(json!("oops")), "/users");
        let again = normalize(
            &Raised::Http(HttpFault::structured(
                first.status,
                "ApiError",
                Some(first.body.message.clone()),
                Some(first.body.error.clone()),
            )),
            "/users",
        );

        assert_eq!(again.status, first.status);
        assert_eq!(again.body, first.body);
    }

    #[test]
    fn validation_faults_keep_field_info_below_500() {
        let raised = Raised::App(
            PresentationError::bad_request("invalid request body")
                .with_info(json!({"fields": {"email": ["email must be a valid email address"]}})),
        );
        let api_error = normalize(&raised, "/users/samples");

        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        let info = api_error.body.info.unwrap();
        assert!(info["fields"]["email"].is_array());
    }
}

//! Error response envelope shared by the API layer and its logs.
//!
//! Every failed request produces two variants of the same envelope: a
//! detailed one that goes to the logs, and a client one that is returned
//! over HTTP. For server-side failures (status >= 500) the client variant
//! is stripped down to a fixed generic message so internals never leak.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fixed message returned to clients for any server-side failure.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";
/// Fixed error kind returned to clients for any server-side failure.
pub const INTERNAL_SERVER_ERROR_KIND: &str = "InternalServerError";

/// An error message: a single string, or a list of per-field messages
/// as produced by request validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl From<String> for ErrorMessage {
    fn from(s: String) -> Self {
        ErrorMessage::One(s)
    }
}

impl From<&str> for ErrorMessage {
    fn from(s: &str) -> Self {
        ErrorMessage::One(s.to_string())
    }
}

impl From<Vec<String>> for ErrorMessage {
    fn from(messages: Vec<String>) -> Self {
        ErrorMessage::Many(messages)
    }
}

impl std::fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorMessage::One(s) => f.write_str(s),
            ErrorMessage::Many(list) => f.write_str(&list.join("; ")),
        }
    }
}

/// The error envelope serialized into every failed HTTP response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub status_code: u16,
    pub message: ErrorMessage,
    pub error: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<Map<String, Value>>,
}

impl ErrorEnvelope {
    /// Full envelope for internal logs: message, kind, and info verbatim.
    pub fn detailed(
        status_code: u16,
        message: ErrorMessage,
        error: impl Into<String>,
        path: impl Into<String>,
        info: Option<Map<String, Value>>,
    ) -> Self {
        Self {
            status_code,
            message,
            error: error.into(),
            path: path.into(),
            info,
        }
    }

    /// Client-safe envelope. Server-side failures (status >= 500) get the
    /// fixed generic message and kind, and `info` is dropped entirely.
    pub fn client(
        status_code: u16,
        message: ErrorMessage,
        error: impl Into<String>,
        path: impl Into<String>,
        info: Option<Map<String, Value>>,
    ) -> Self {
        if status_code >= 500 {
            Self {
                status_code,
                message: INTERNAL_SERVER_ERROR_MESSAGE.into(),
                error: INTERNAL_SERVER_ERROR_KIND.to_string(),
                path: path.into(),
                info: None,
            }
        } else {
            Self::detailed(status_code, message, error, path, info)
        }
    }
}

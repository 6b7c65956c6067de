//! User endpoint DTOs and request validation.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use validator::{Validate, ValidationErrors};

use account_core::errors::{AppError, PresentationError};
use account_core::repositories::user_query::UserSummary;
use account_shared::types::pagination::{Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};

/// Body of `POST /users/samples`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,

    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

/// Query string of `GET /users`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListUsersParams {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(
            self.page.unwrap_or(DEFAULT_PAGE),
            self.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}

/// One user in the `GET /users` listing.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<UserSummary> for UserResponse {
    fn from(summary: UserSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            email: summary.email,
        }
    }
}

/// Turn validator output into a 400 fault carrying the per-field
/// messages under `info.fields`.
pub fn validation_fault(errors: &ValidationErrors) -> AppError {
    let mut fields = Map::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<Value> = field_errors
            .iter()
            .map(|error| {
                error
                    .message
                    .as_ref()
                    .map(|message| Value::String(message.to_string()))
                    .unwrap_or_else(|| Value::String(error.code.to_string()))
            })
            .collect();
        fields.insert(field.to_string(), Value::Array(messages));
    }

    PresentationError::bad_request("invalid request body").with_info(json!({ "fields": fields }))
}

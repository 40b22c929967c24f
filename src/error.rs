//! Typed errors and HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

/// Persisted record kinds, used to label not-found errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    Category,
    Supplier,
    Product,
}

impl Entity {
    pub fn label(self) -> &'static str {
        match self {
            Entity::Category => "Category",
            Entity::Supplier => "Supplier",
            Entity::Product => "Product",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which integrity rule a write ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictKind {
    /// A unique column already holds the value.
    Duplicate,
    /// A foreign key points at a row that does not exist.
    UnknownReference,
    /// The row is still referenced by products and cannot be deleted.
    InUse,
}

impl ConflictKind {
    pub fn message(self) -> &'static str {
        match self {
            ConflictKind::Duplicate => "Duplicate entry",
            ConflictKind::UnknownReference => "Referenced record does not exist",
            ConflictKind::InUse => "Record is still referenced by products",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0} not found")]
    NotFound(Entity),
    #[error("validation: {field}: {message}")]
    Validation { field: &'static str, message: String },
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
    #[error("conflict: {kind:?} on {field:?}")]
    Conflict {
        kind: ConflictKind,
        field: Option<&'static str>,
    },
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("internal: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn conflict(kind: ConflictKind, field: Option<&'static str>) -> Self {
        AppError::Conflict { kind, field }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation { .. } | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Config(_) | AppError::Db(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(rejection.body_text());
        }
        AppError::BadRequest(rejection.body_text())
    }
}

/// Error envelope returned to clients. Internal error text never lands in `details`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        ErrorBody {
            error: error.into(),
            details: None,
            field: None,
        }
    }
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        match err {
            AppError::NotFound(entity) => ErrorBody::new(format!("{} not found", entity)),
            AppError::Validation { field, message } => ErrorBody {
                error: "Validation failed".into(),
                details: Some(message.clone()),
                field: Some((*field).to_string()),
            },
            AppError::BadRequest(details) => ErrorBody {
                error: "Invalid request body".into(),
                details: Some(details.clone()),
                field: None,
            },
            AppError::PayloadTooLarge(details) => ErrorBody {
                error: "Request body too large".into(),
                details: Some(details.clone()),
                field: None,
            },
            AppError::Conflict { kind, field } => ErrorBody {
                error: kind.message().into(),
                details: None,
                field: field.map(str::to_string),
            },
            AppError::Config(_) | AppError::Db(_) | AppError::Internal(_) => {
                ErrorBody::new("An unexpected error occurred")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Conflict { .. } => tracing::warn!(error = %self, "write rejected"),
            _ if status.is_server_error() => tracing::error!(error = ?self, "request failed"),
            _ => tracing::debug!(error = %self, "client error"),
        }
        (status, Json(ErrorBody::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_json(err: &AppError) -> serde_json::Value {
        serde_json::to_value(ErrorBody::from(err)).unwrap()
    }

    #[test]
    fn duplicate_maps_to_conflict_with_field() {
        let err = AppError::conflict(ConflictKind::Duplicate, Some("name"));
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(
            body_json(&err),
            serde_json::json!({"error": "Duplicate entry", "field": "name"})
        );
    }

    #[test]
    fn not_found_names_the_entity() {
        let err = AppError::NotFound(Entity::Supplier);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(&err), serde_json::json!({"error": "Supplier not found"}));
    }

    #[test]
    fn validation_carries_details_and_field() {
        let err = AppError::validation("category_id", "category_id must be a valid UUID");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        let body = body_json(&err);
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["field"], "category_id");
        assert_eq!(body["details"], "category_id must be a valid UUID");
    }

    #[test]
    fn oversized_body_is_413_with_details() {
        let err = AppError::PayloadTooLarge("length limit exceeded".into());
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body_json(&err),
            serde_json::json!({"error": "Request body too large", "details": "length limit exceeded"})
        );
    }

    #[test]
    fn database_errors_do_not_leak() {
        let err = AppError::Db(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(&err),
            serde_json::json!({"error": "An unexpected error occurred"})
        );
    }
}

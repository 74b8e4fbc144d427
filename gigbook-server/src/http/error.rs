//! API error types with IntoResponse
//!
//! Errors are converted to JSON pages with appropriate status codes. A lookup
//! miss and a rejected submission both render as 404, with distinct bodies.
//! Storage failures carry a flash-style notice; their details are logged,
//! never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gigbook_core::ValidationErrors;
use serde_json::json;

use crate::db::DbError;

/// Notice shown when a storage failure has no more specific wording
const GENERIC_NOTICE: &str = "An error occurred. Please try again later.";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Submitted fields failed their checks (404, per-field messages)
    Validation(ValidationErrors),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Write rejected by an integrity constraint (409)
    Constraint { notice: String, source: DbError },

    /// Storage unreachable or too slow (503)
    Unavailable { notice: String, source: DbError },

    /// Unexpected database error (500, logged)
    Database(DbError),

    /// Internal error (500)
    Internal { message: String },
}

impl ApiError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Replace the flash notice of a storage failure.
    pub fn with_notice(self, notice: impl Into<String>) -> Self {
        match self {
            Self::Constraint { source, .. } => Self::Constraint {
                notice: notice.into(),
                source,
            },
            Self::Unavailable { source, .. } => Self::Unavailable {
                notice: notice.into(),
                source,
            },
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Constraint { .. } => StatusCode::CONFLICT,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation(errors) => json!({
                "error": "validation_failed",
                "message": errors.to_string(),
                "fields": errors
            }),
            Self::NotFound { resource, id } => json!({
                "error": "not_found",
                "message": format!("{} '{}' not found", resource, id)
            }),
            Self::Constraint { notice, source } => {
                tracing::warn!("Constraint violation: {}", source);
                json!({
                    "error": "constraint_violation",
                    "flash": notice
                })
            }
            Self::Unavailable { notice, source } => {
                tracing::error!("Storage unavailable: {}", source);
                json!({
                    "error": "storage_unavailable",
                    "flash": notice
                })
            }
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                json!({
                    "error": "internal_error",
                    "message": "an internal error occurred"
                })
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                json!({
                    "error": "internal_error",
                    "message": "an internal error occurred"
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::ConstraintViolation { .. } => Self::Constraint {
                notice: GENERIC_NOTICE.to_owned(),
                source: e,
            },
            DbError::StorageUnavailable { .. } => Self::Unavailable {
                notice: GENERIC_NOTICE.to_owned(),
                source: e,
            },
            DbError::Query(_) => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use gigbook_core::ValidationError;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_404_with_fields() {
        let err = ApiError::Validation(ValidationError::Empty { field: "name" }.into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_failed");
        assert_eq!(body["fields"]["name"][0], "name cannot be empty");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::not_found("venue", 42);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["message"], "venue '42' not found");
    }

    #[tokio::test]
    async fn constraint_violation_is_409_with_notice() {
        let err = ApiError::from(DbError::ConstraintViolation {
            constraint: "shows_venue_id_fkey".into(),
            message: "insert or update on table \"shows\" violates foreign key".into(),
        })
        .with_notice("An error occurred. Show could not be listed.");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["flash"], "An error occurred. Show could not be listed.");
        assert!(!body.to_string().contains("shows_venue_id_fkey"));
    }

    #[tokio::test]
    async fn unavailable_is_503_and_hides_reason() {
        let err = ApiError::from(DbError::StorageUnavailable {
            reason: "connection refused".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = body_json(response).await;
        assert_eq!(body["flash"], GENERIC_NOTICE);
        assert!(!body.to_string().contains("refused"));
    }

    #[tokio::test]
    async fn query_error_is_500() {
        let err = ApiError::from(DbError::Query(sqlx::Error::RowNotFound));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn notice_leaves_other_errors_alone() {
        let err = ApiError::not_found("artist", 3).with_notice("ignored");
        assert!(matches!(err, ApiError::NotFound { resource: "artist", .. }));
    }
}

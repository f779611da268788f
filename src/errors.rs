use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::models::CommonResp;

/// Top-level application error.
/// All variants carry a human-readable message for display/logging.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Database errors ──────────────────────────────────────────────────────
    #[error("Database connection failed: {0}")]
    DatabaseConnectionFailed(#[source] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationFailed(#[source] sqlx::migrate::MigrateError),

    #[error("Database query failed: {message}")]
    DatabaseQueryFailed {
        message: String,
        #[source]
        source: sqlx::Error,
    },

    // ── Validation errors ────────────────────────────────────────────────────
    #[error("Field '{field_name}' cannot be empty")]
    EmptyField { field_name: String },

    #[error("Field '{field_name}' exceeds max length of {max_length} (actual: {actual_length})")]
    FieldTooLong { field_name: String, max_length: usize, actual_length: usize },

    // ── Conversation errors ──────────────────────────────────────────────────
    #[error("Conversation '{id}' not found")]
    ConversationNotFound { id: i64 },
}

impl AppError {
    pub fn db_query(message: impl Into<String>, source: sqlx::Error) -> Self {
        AppError::DatabaseQueryFailed { message: message.into(), source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::ConversationNotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::EmptyField { .. } | AppError::FieldTooLong { .. })
    }

    pub fn status_code(&self) -> StatusCode {
        if self.is_validation() {
            StatusCode::BAD_REQUEST
        } else if self.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    pub fn result_code(&self) -> &'static str {
        if self.is_validation() {
            "INVALID_PARAM"
        } else if self.is_not_found() {
            "NOT_FOUND"
        } else {
            "SYSTEM_ERROR"
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = CommonResp::<()>::failure(self.result_code(), self.to_string());
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = AppError::ConversationNotFound { id: 999_999 };
        assert!(err.is_not_found());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.result_code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "Conversation '999999' not found");
    }

    #[test]
    fn validation_maps_to_400() {
        let err = AppError::FieldTooLong {
            field_name: "title".to_string(),
            max_length: 255,
            actual_length: 300,
        };
        assert!(err.is_validation());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.result_code(), "INVALID_PARAM");
    }

    #[test]
    fn storage_failures_are_internal() {
        let err = AppError::db_query("Failed to fetch conversations", sqlx::Error::RowNotFound);
        assert!(!err.is_not_found());
        assert!(!err.is_validation());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.result_code(), "SYSTEM_ERROR");
    }
}

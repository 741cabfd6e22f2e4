//! Error type and the JSON error body returned to clients

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error carried to the HTTP edge
///
/// `message` is what the client sees. `details` holds structured context
/// such as the offending form field.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Shorthands ====================

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn required_field(field: impl Into<String>) -> Self {
        Self::new(ErrorCode::RequiredField).with_detail("field", field.into())
    }

    /// No session token on a protected route
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Token present but unknown or expired
    pub fn session_invalid(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::SessionInvalid, msg)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    pub fn admin_required() -> Self {
        Self::new(ErrorCode::AdminRequired)
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every error response: `{code, message, details?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code,
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.http_status();

        // 系统错误只在服务端记录
        if self.code.category() == ErrorCategory::System {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, axum::Json(ErrorBody::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_default_and_custom_message() {
        let err = AppError::new(ErrorCode::ReceiptNotFound);
        assert_eq!(err.code, ErrorCode::ReceiptNotFound);
        assert_eq!(err.message, ErrorCode::ReceiptNotFound.message());
        assert!(err.details.is_none());

        let err = AppError::validation("amount must be positive");
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(format!("{err}"), "amount must be positive");
    }

    #[test]
    fn test_required_field_carries_field_name() {
        let err = AppError::required_field("rhNo");
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.details.unwrap().get("field").unwrap(), "rhNo");
    }

    #[test]
    fn test_auth_shorthands_map_to_status() {
        assert_eq!(AppError::unauthorized().http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::session_invalid("expired").http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::admin_required().http_status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::conflict("taken").http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_error_body_serializes_numeric_code() {
        let err = AppError::new(ErrorCode::ReceiptAlreadyDecided).with_detail("id", 7);
        let json = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(json["code"], ErrorCode::ReceiptAlreadyDecided.code());
        assert_eq!(json["details"]["id"], 7);

        let plain = serde_json::to_value(ErrorBody::from(&AppError::unauthorized())).unwrap();
        assert!(plain.get("details").is_none());
    }

    #[test]
    fn test_into_response_uses_code_status() {
        let response = AppError::new(ErrorCode::FileTooLarge).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let response = AppError::database("disk full").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

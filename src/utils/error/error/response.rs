//! HTTP response handling for errors

use super::types::EngineError;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

impl ResponseError for EngineError {
    fn status_code(&self) -> StatusCode {
        match self {
            EngineError::Validation(_) => StatusCode::BAD_REQUEST,
            EngineError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            EngineError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            EngineError::Conflict(msg) => ("CONFLICT", msg.clone()),
            EngineError::Database(_) => (
                "DATABASE_ERROR",
                "Database operation failed".to_string(),
            ),
            EngineError::Io(_) => ("IO_ERROR", "Error while files processing".to_string()),
            _ => ("INTERNAL_ERROR", "An internal error occurred".to_string()),
        };

        // The body hides the cause, so keep it in the log.
        if !self.is_client_error() {
            error!(error = %self, "request failed");
        }

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(self.status_code()).json(error_response)
    }
}

/// Standard error response format
#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}

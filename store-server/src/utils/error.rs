//! Unified error handling
//!
//! Application error type and response envelope:
//! - [`AppError`] - application error enum
//! - [`AppResponse`] - API response structure
//!
//! # Error code families
//!
//! | Prefix | Category | Example |
//! |--------|----------|---------|
//! | E0xxx  | Request/business errors | E0002 validation failed |
//! | E9xxx  | System errors | E9001 internal error |
//!
//! # Usage
//!
//! ```ignore
//! // Return an error
//! Err(AppError::not_found("Order order-1 not found"))
//!
//! // Return a success response
//! Ok(ok(data))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Unified API response structure
///
/// ```json
/// {
///   "code": "E0000",
///   "message": "Success",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Error code (E0000 on success)
    pub code: String,
    /// Message
    pub message: String,
    /// Response payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Request/business errors (4xx) ==========
    #[error("Authentication required")]
    /// Missing caller identity (401)
    Unauthorized,

    #[error("Resource not found: {0}")]
    /// Resource does not exist (404)
    NotFound(String),

    #[error("Resource already exists: {0}")]
    /// Resource conflict (409)
    Conflict(String),

    #[error("Validation failed: {0}")]
    /// Input validation failed (400)
    Validation(String),

    #[error("Business rule violation: {0}")]
    /// Business rule violation (422)
    BusinessRule(String),

    // ========== Upstream errors (5xx) ==========
    #[error("Payment gateway error: {0}")]
    /// Payment session creation failed (502)
    Gateway(String),

    // ========== System errors (5xx) ==========
    #[error("Internal server error: {0}")]
    /// Internal error (500)
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "E3001", "Please login first"),

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.as_str()),

            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.as_str()),

            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.as_str()),

            AppError::BusinessRule(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "E0005", msg.as_str())
            }

            // Gateway errors (502): the order, if any, stays PENDING
            AppError::Gateway(msg) => {
                error!(target: "gateway", error = %msg, "Payment gateway error");
                (StatusCode::BAD_GATEWAY, "E0007", "Payment gateway error")
            }

            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error",
                )
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message: message.to_string(),
            data: None,
        });

        (status, body).into_response()
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn business_rule(msg: impl Into<String>) -> Self {
        Self::BusinessRule(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: "Success".to_string(),
        data: Some(data),
    })
}

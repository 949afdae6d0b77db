//! Unified error handling for the Pahana Books backend
//!
//! All engine-level failures are translated at the HTTP boundary into the
//! fixed `{"success": false, "message": "..."}` response shape.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Main application error type
///
/// All errors in the application should be converted to this type.
/// It implements `ResponseError` for automatic HTTP response generation.
#[derive(Error, Debug)]
pub enum AppError {
    // ==================== Authentication Errors ====================
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: insufficient permissions")]
    Forbidden,

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    // ==================== Business Logic Errors ====================
    #[error("Customer not found with account number: {0}")]
    CustomerNotFound(String),

    #[error("Bill not found: {0}")]
    BillNotFound(String),

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    // ==================== Validation Errors ====================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    // ==================== Resource Errors ====================
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    // ==================== Internal Errors ====================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::Validation(_) | AppError::MissingField(_) => StatusCode::BAD_REQUEST,

            // 401 Unauthorized
            AppError::InvalidCredentials | AppError::InvalidToken(_) | AppError::TokenExpired => {
                StatusCode::UNAUTHORIZED
            }

            // 403 Forbidden
            AppError::Forbidden | AppError::Unauthorized(_) => StatusCode::FORBIDDEN,

            // 404 Not Found
            AppError::CustomerNotFound(_)
            | AppError::BillNotFound(_)
            | AppError::BookNotFound(_)
            | AppError::OrderNotFound(_)
            | AppError::NotFound(_) => StatusCode::NOT_FOUND,

            // 409 Conflict
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,

            // 500 Internal Server Error
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        // Fixed failure envelope shared by every endpoint.
        let body = json!({
            "success": false,
            "message": self.to_string(),
        });

        HttpResponse::build(self.status_code()).json(body)
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

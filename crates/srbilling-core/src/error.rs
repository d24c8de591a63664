//! Unified error handling for SR Billing
//!
//! This module provides the error type shared by the query, repository and
//! HTTP layers, with automatic HTTP response mapping.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Main application error type
///
/// Database failures are classified once, in the db crate, and then passed
/// through every layer unchanged.
#[derive(Error, Debug)]
pub enum AppError {
    // ==================== Database Errors ====================
    #[error("Database error: {0}")]
    Database(String),

    #[error("Database pool error: {0}")]
    Pool(String),

    #[error("Transaction failed: {0}")]
    Transaction(String),

    #[error("Row scan failed: {0}")]
    RowScan(String),

    /// A query that must yield data returned nothing
    #[error("No rows: {0}")]
    NoRows(String),

    // ==================== Constraint Errors ====================
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Unknown reference: {0}")]
    UnknownReference(String),

    // ==================== Request Errors ====================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

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
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            AppError::NoRows(_) => StatusCode::NOT_FOUND,

            // 409 Conflict
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,

            // 422 Unprocessable Entity
            AppError::UnknownReference(_) => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "database_error",
            AppError::Pool(_) => "pool_error",
            AppError::Transaction(_) => "transaction_error",
            AppError::RowScan(_) => "row_scan_error",
            AppError::NoRows(_) => "no_rows",
            AppError::AlreadyExists(_) => "already_exists",
            AppError::UnknownReference(_) => "unknown_reference",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Internal(_) => "internal_error",
            AppError::Config(_) => "config_error",
            AppError::Serialization(_) => "serialization_error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = json!({
            "error": self.error_code(),
            "message": self.to_string(),
            "status": status.as_u16(),
        });

        HttpResponse::build(status).json(body)
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

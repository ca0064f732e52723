//! Unified error types for the Usana backend.
//!
//! The taxonomy is deliberately flat: validation failures carry every
//! offending field, not-found and forbidden are distinct signals (existence
//! is not hidden from non-owners), and anything unexpected maps to a generic
//! server error with details going to the log only.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// A single rejected input field.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field, as it appears on the wire
    pub field: &'static str,
    /// Human-readable reason the field was rejected
    pub message: String,
}

impl FieldError {
    /// Creates a field error for `field` with the given message.
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or out-of-enum input, detected before persistence
    #[error("Validation failed")]
    Validation {
        /// Every offending field, reported together
        errors: Vec<FieldError>,
    },

    /// The referenced record id does not resolve to an existing document
    #[error("{resource} not found")]
    NotFound {
        /// Resource noun used in the client-facing message
        resource: &'static str,
        /// The id that failed to resolve
        id: String,
    },

    /// The record exists but is owned by a different user
    #[error("Not authorized to access this {resource}")]
    Forbidden {
        /// Resource noun used in the client-facing message
        resource: &'static str,
        /// The id of the record the caller may not touch
        id: String,
    },

    /// No authenticated user identity was supplied with the request
    #[error("User not authenticated")]
    Unauthenticated,

    /// Settings or reference data failed to load or parse
    #[error("Configuration error: {message}")]
    Config {
        /// What failed to load or parse
        message: String,
    },

    /// The store reported a failure; surfaced generically to clients
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Listener or filesystem failure during startup
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a validation failure over the given fields.
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation { errors }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation { errors } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "message": "Validation failed",
                    "errors": errors,
                }),
            ),
            Self::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                json!({ "success": false, "message": self.to_string() }),
            ),
            Self::Forbidden { .. } => (
                StatusCode::FORBIDDEN,
                json!({ "success": false, "message": self.to_string() }),
            ),
            Self::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                json!({ "success": false, "message": self.to_string() }),
            ),
            Self::Config { .. } | Self::Database(_) | Self::Io(_) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "message": "Server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

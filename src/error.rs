//! Error types for the Armarium client

use serde::Deserialize;
use thiserror::Error;

/// Error envelope returned by the Armarium server on failed requests
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub code: u32,
    pub error: String,
    pub message: String,
}

/// Main client error type
#[derive(Error, Debug)]
pub enum ApiError {
    /// Caught locally before any network call (empty fields, bad email,
    /// short password, mismatched confirmation).
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other rejection the server expressed through its error envelope
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Decode failure of trusted local data (persisted bearer token).
    /// Fatal to the session, never silently swallowed.
    #[error("Token decode error: {0}")]
    TokenDecode(String),

    #[error("Token storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Internal client error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Map a non-success HTTP status and the server's error envelope (when
    /// it sent one) into the client taxonomy.
    pub fn from_response(status: reqwest::StatusCode, envelope: Option<ErrorEnvelope>) -> Self {
        let message = envelope.map(|e| e.message).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

        match status {
            reqwest::StatusCode::UNAUTHORIZED => ApiError::Authentication(message),
            reqwest::StatusCode::FORBIDDEN => ApiError::Authorization(message),
            reqwest::StatusCode::NOT_FOUND => ApiError::NotFound(message),
            reqwest::StatusCode::CONFLICT => ApiError::Conflict(message),
            _ => ApiError::Rejected {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// User-facing message without the variant prefix
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(m)
            | ApiError::Authentication(m)
            | ApiError::Authorization(m)
            | ApiError::NotFound(m)
            | ApiError::Conflict(m)
            | ApiError::TokenDecode(m)
            | ApiError::Internal(m) => m.clone(),
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Network(e) => e.to_string(),
            ApiError::Storage(e) => e.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                match &error.message {
                    Some(msg) => messages.push(msg.to_string()),
                    None => messages.push(format!("Invalid value for {}", field)),
                }
            }
        }
        messages.sort();
        ApiError::Validation(messages.join("; "))
    }
}

/// Result type alias for client operations
pub type ApiResult<T> = Result<T, ApiError>;

//! Error types module
//!
//! This module provides the core error types used throughout the uploader
//! service. All errors are unified under the `AppError` enum, which maps each
//! failure class to an HTTP status, a machine-readable code, and a log level.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like malformed client requests
    Debug,
    /// Warning level - for authorization failures
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// HTTP status code to return for this error
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::InvalidRequest(_) => 400,
            AppError::Unauthorized(_) => 401,
            AppError::AccessDenied(_) => 403,
            AppError::Storage(_) => 500,
            AppError::Notification(_) => 500,
            AppError::Internal(_) => 500,
            AppError::InternalWithSource { .. } => 500,
        }
    }

    /// Machine-readable error code (e.g. "ACCESS_DENIED")
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(_) => "INVALID_REQUEST",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::AccessDenied(_) => "ACCESS_DENIED",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Notification(_) => "NOTIFICATION_ERROR",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "INTERNAL_ERROR",
        }
    }

    /// Client-facing message. Internal failures get a generic message so that
    /// backend details never leak into responses.
    pub fn client_message(&self) -> String {
        match self {
            AppError::InvalidRequest(msg) => format!("Invalid request: {}", msg),
            AppError::Unauthorized(msg) => format!("Unauthorized: {}", msg),
            AppError::AccessDenied(msg) => msg.clone(),
            AppError::Storage(_) => "Failed to store uploaded file".to_string(),
            AppError::Notification(_) => "Failed to notify downstream service".to_string(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal server error".to_string()
            }
        }
    }

    /// Log level for this error
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::InvalidRequest(_) | AppError::Unauthorized(_) => LogLevel::Debug,
            AppError::AccessDenied(_) => LogLevel::Warn,
            AppError::Storage(_)
            | AppError::Notification(_)
            | AppError::Internal(_)
            | AppError::InternalWithSource { .. } => LogLevel::Error,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

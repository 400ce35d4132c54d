//! Domain error types
//!
//! This module defines the error hierarchy for cfbackup. Errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main backup error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum BackupError {
    /// Malformed or missing configuration, unreadable config file
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Cloudflare API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Directory creation or file write failures
    #[error("Filesystem error: {0}")]
    Filesystem(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Shutdown was requested while the export was running
    #[error("Export cancelled by shutdown signal")]
    Cancelled,

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Cloudflare API errors
///
/// These errors don't expose the HTTP client's types.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to reach the API
    #[error("Failed to connect to Cloudflare API: {0}")]
    ConnectionFailed(String),

    /// Credentials rejected (401/403)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Request rejected by the API, either by status code or `success: false`
    #[error("Request failed: {status} - {message}")]
    RequestFailed { status: u16, message: String },

    /// Rate limit exceeded (429)
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Response body could not be understood
    #[error("Invalid response from API: {0}")]
    InvalidResponse(String),

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

impl ApiError {
    /// Whether a retry could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::ConnectionFailed(_)
                | ApiError::RateLimited(_)
                | ApiError::ServerError { .. }
                | ApiError::Timeout(_)
        )
    }
}

impl From<std::io::Error> for BackupError {
    fn from(err: std::io::Error) -> Self {
        BackupError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BackupError {
    fn from(err: serde_json::Error) -> Self {
        BackupError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for BackupError {
    fn from(err: serde_yaml::Error) -> Self {
        BackupError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for BackupError {
    fn from(err: toml::de::Error) -> Self {
        BackupError::Configuration(format!("TOML parse error: {err}"))
    }
}

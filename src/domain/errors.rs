//! Domain error types
//!
//! This module defines the error hierarchy for the Qualtrics client.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main client error type
///
/// This is the primary error type used throughout the crate.
/// Configuration-time, request-time and export-time failures all end up here.
#[derive(Debug, Error)]
pub enum QualtricsError {
    /// Unknown data center literal
    #[error("{0} not a valid datacenter")]
    InvalidDataCenter(String),

    /// No API token could be resolved from configuration or environment
    #[error("No Qualtrics API token provided")]
    MissingApiToken,

    /// Requested export format is not supported by the export endpoint
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Survey page-size limit below the enforced floor
    #[error("Limit must be no less than {minimum}, got {requested}")]
    MinimumSurveyCount { requested: usize, minimum: usize },

    /// Qualtrics API errors (HTTP status, connection, timeout)
    #[error("Qualtrics API error: {0}")]
    Api(#[from] ApiError),

    /// The export job reached a failed terminal status
    #[error("Export {progress_id} failed with status '{status}'")]
    ExportFailure { progress_id: String, status: String },

    /// The export job did not reach a terminal status before the deadline
    #[error("Export {progress_id} did not complete within {elapsed_secs}s")]
    ExportTimeout {
        progress_id: String,
        elapsed_secs: u64,
    },

    /// The export was cancelled by a shutdown signal
    #[error("Export {0} cancelled")]
    Cancelled(String),

    /// Archive extraction errors
    #[error("Archive error: {0}")]
    Archive(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl QualtricsError {
    /// Whether this error was caused by the transport layer
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            QualtricsError::Api(
                ApiError::Connection(_) | ApiError::Timeout(_) | ApiError::Interrupted(_)
            )
        )
    }
}

/// Qualtrics API errors
///
/// Errors that occur when talking to the Qualtrics REST API.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response, carrying the server's error message
    #[error("HTTP error occurred ({status}). {message}")]
    Status { status: u16, message: String },

    /// Failed to establish a connection
    #[error("Could not establish connection: {0}")]
    Connection(String),

    /// No response before the per-request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Connection dropped after the request was sent
    #[error("Request interrupted: {0}")]
    Interrupted(String),

    /// Response body did not have the expected shape
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Transport failures are worth retrying for idempotent requests, HTTP statuses are not
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Connection(_) | ApiError::Timeout(_) | ApiError::Interrupted(_)
        )
    }

    /// Whether the request can have reached the server
    ///
    /// Only a failed connection attempt guarantees it did not.
    pub fn may_have_been_delivered(&self) -> bool {
        !matches!(self, ApiError::Connection(_))
    }

    /// HTTP status code, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<std::io::Error> for QualtricsError {
    fn from(err: std::io::Error) -> Self {
        QualtricsError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for QualtricsError {
    fn from(err: serde_json::Error) -> Self {
        QualtricsError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for QualtricsError {
    fn from(err: toml::de::Error) -> Self {
        QualtricsError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<zip::result::ZipError> for QualtricsError {
    fn from(err: zip::result::ZipError) -> Self {
        QualtricsError::Archive(err.to_string())
    }
}

//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels, overridable through `RUST_LOG`
//! - Console output
//! - JSON-formatted local log files with rotation
//!
//! # Example
//!
//! ```no_run
//! use qualtrics_client::config::LoggingConfig;
//! use qualtrics_client::logging::init_logging;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export
///
/// # Example
///
/// ```no_run
/// use qualtrics_client::log_export_start;
/// use qualtrics_client::domain::{FileFormat, SurveyId};
///
/// let survey_id = SurveyId::new("SV_1").unwrap();
/// log_export_start!(&survey_id, FileFormat::Csv);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($survey_id:expr, $file_format:expr) => {
        tracing::info!(
            survey_id = %$survey_id,
            format = %$file_format,
            "Starting export"
        );
    };
}

/// Log the completion of an export
///
/// # Example
///
/// ```no_run
/// use qualtrics_client::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!(3, Duration::from_secs(10));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($file_count:expr, $duration:expr) => {
        tracing::info!(
            files = $file_count,
            duration_ms = $duration.as_millis() as u64,
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use qualtrics_client::log_error_with_context;
/// use qualtrics_client::domain::QualtricsError;
///
/// let error = QualtricsError::MissingApiToken;
/// log_error_with_context!(&error, "Failed to create client");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use qualtrics_client::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying request"
        );
    };
}

//! CLI command implementations
//!
//! Every command returns its process exit code:
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 2 | Configuration or input error |
//! | 3 | Export failed, timed out or was cancelled |
//! | 4 | Connection or API error |
//! | 5 | Fatal error |

pub mod directories;
pub mod export;
pub mod filters;
pub mod init;
pub mod surveys;
pub mod validate;

use crate::adapters::qualtrics::QualtricsClient;
use crate::config::{load_config, ClientConfig};
use crate::domain::QualtricsError;
use crate::log_error_with_context;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_CONFIG_ERROR: i32 = 2;
pub const EXIT_EXPORT_FAILURE: i32 = 3;
pub const EXIT_CONNECTION_ERROR: i32 = 4;
pub const EXIT_FATAL: i32 = 5;

/// Map an error onto the exit code table
pub fn exit_code_for(error: &QualtricsError) -> i32 {
    match error {
        QualtricsError::InvalidDataCenter(_)
        | QualtricsError::MissingApiToken
        | QualtricsError::UnsupportedFormat(_)
        | QualtricsError::MinimumSurveyCount { .. }
        | QualtricsError::Configuration(_)
        | QualtricsError::Validation(_) => EXIT_CONFIG_ERROR,
        QualtricsError::ExportFailure { .. }
        | QualtricsError::ExportTimeout { .. }
        | QualtricsError::Cancelled(_)
        | QualtricsError::Archive(_) => EXIT_EXPORT_FAILURE,
        QualtricsError::Api(_) => EXIT_CONNECTION_ERROR,
        QualtricsError::Io(_) | QualtricsError::Serialization(_) => EXIT_FATAL,
    }
}

/// Report a failed command on stderr and return its exit code
pub(crate) fn report_error(error: &QualtricsError, context: &str) -> i32 {
    log_error_with_context!(error, context);
    eprintln!("❌ {context}");
    eprintln!("   Error: {error}");
    exit_code_for(error)
}

/// Load the configuration file and build a client from it
///
/// On failure the error is reported and the exit code returned instead.
pub(crate) fn connect(config_path: &str) -> Result<(ClientConfig, QualtricsClient), i32> {
    let config = load_config(config_path)
        .map_err(|e| report_error(&e, "Failed to load configuration"))?;

    let client = QualtricsClient::new(config.qualtrics.clone())
        .map_err(|e| report_error(&e, "Failed to create Qualtrics client"))?;

    tracing::debug!(client = %client, "Connected");
    Ok((config, client))
}

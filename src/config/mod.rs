//! Configuration management for the Qualtrics client.
//!
//! TOML configuration with `${VAR_NAME}` substitution, `QUALTRICS_*`
//! environment overrides, defaults for optional settings and validation on
//! load.
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`QualtricsConfig`] - Data center, API token, timeout and retries
//! - [`ExportConfig`] - Default format, destination directory, poll pacing
//! - [`SurveysConfig`] - Survey listing limit
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [qualtrics]
//! data_center = "fra1"
//! api_token = "${QUALTRICS_API_TOKEN}"
//! timeout_seconds = 10
//!
//! [export]
//! default_format = "csv"
//! destination_dir = "MyQualtricsDownload"
//!
//! [export.poll]
//! interval_ms = 1000
//! timeout_seconds = 1800
//! ```
//!
//! # Token Resolution
//!
//! 1. `qualtrics.api_token` from the file (after `${VAR}` substitution)
//! 2. `QUALTRICS_API_TOKEN`, which overrides the file value
//! 3. `QUALTRICS_TOKEN`, used only when neither of the above is set
//!
//! The client never reads the environment itself.

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, ClientConfig, ExportConfig, LoggingConfig, PollConfig, QualtricsConfig,
    RetryConfig, SurveysConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};

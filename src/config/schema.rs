//! Configuration schema types
//!
//! This module defines the configuration structure that maps to the TOML file.

use crate::config::SecretString;
use crate::domain::{DataCenter, FileFormat, QualtricsError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Smallest survey listing limit the API client accepts
pub const MIN_SURVEY_LIMIT: usize = 100;

/// Directory export archives are extracted into by default
pub const DEFAULT_DESTINATION_DIR: &str = "MyQualtricsDownload";

/// Main client configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Qualtrics connection settings
    pub qualtrics: QualtricsConfig,

    /// Response export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Survey management settings
    #[serde(default)]
    pub surveys: SurveysConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// - [`QualtricsError::InvalidDataCenter`] for an unknown data center
    /// - [`QualtricsError::MissingApiToken`] when no token was resolved
    /// - [`QualtricsError::Configuration`] for any other invalid value
    pub fn validate(&self) -> Result<()> {
        self.application.validate()?;
        self.qualtrics.validate()?;
        self.export.validate()?;
        self.surveys.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(invalid(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            )));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Transport retry configuration
///
/// Only connection and timeout failures are retried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    /// Delay before retry number `attempt` (1-based)
    pub fn delay_for(&self, attempt: usize) -> Duration {
        let factor = self
            .backoff_multiplier
            .powi(attempt.saturating_sub(1) as i32);
        let delay_ms = (self.initial_delay_ms as f64 * factor) as u64;
        Duration::from_millis(delay_ms.min(self.max_delay_ms))
    }

    fn validate(&self) -> Result<()> {
        if self.max_retries > 10 {
            return Err(invalid(format!(
                "qualtrics.retry.max_retries must be <= 10, got {}",
                self.max_retries
            )));
        }
        if !self.backoff_multiplier.is_finite() || self.backoff_multiplier < 1.0 {
            return Err(invalid(format!(
                "qualtrics.retry.backoff_multiplier must be >= 1.0, got {}",
                self.backoff_multiplier
            )));
        }
        Ok(())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Qualtrics connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualtricsConfig {
    /// Data center host segment (fra1, ca1, iad1, sjc1, syd1, gov1)
    pub data_center: String,

    /// API token
    ///
    /// Resolution order: this value, then the `QUALTRICS_API_TOKEN`
    /// override, then `QUALTRICS_TOKEN` (both applied by the loader).
    /// Stored securely in memory and automatically zeroized on drop.
    #[serde(default)]
    pub api_token: Option<SecretString>,

    /// Base URL override (proxies, test servers); derived from the data center when unset
    #[serde(default)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl QualtricsConfig {
    /// Create a configuration for a data center and token with defaults elsewhere
    pub fn new(data_center: impl Into<String>, api_token: Option<SecretString>) -> Self {
        Self {
            data_center: data_center.into(),
            api_token,
            base_url: None,
            timeout_seconds: default_timeout_seconds(),
            retry: RetryConfig::default(),
        }
    }

    fn validate(&self) -> Result<()> {
        use secrecy::ExposeSecret;

        self.data_center.parse::<DataCenter>()?;

        if let Some(ref base_url) = self.base_url {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(invalid("qualtrics.base_url must start with http:// or https://"));
            }
        }

        if self
            .api_token
            .as_ref()
            .map(|t| t.expose_secret().is_blank())
            .unwrap_or(true)
        {
            return Err(QualtricsError::MissingApiToken);
        }

        if self.timeout_seconds == 0 {
            return Err(invalid("qualtrics.timeout_seconds must be > 0"));
        }

        self.retry.validate()
    }
}

impl Default for QualtricsConfig {
    fn default() -> Self {
        Self::new("fra1", None)
    }
}

/// Poll loop pacing for export progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Delay after the first non-terminal poll, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub interval_ms: u64,

    /// Upper bound for the delay between polls, in milliseconds
    #[serde(default = "default_poll_max_interval_ms")]
    pub max_interval_ms: u64,

    /// Growth factor applied to the delay after each poll
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Overall deadline for one export in seconds (0 disables the deadline)
    #[serde(default = "default_poll_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl PollConfig {
    /// Delay before the first re-poll
    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.min(self.max_interval_ms))
    }

    /// Delay following `current`
    pub fn next_interval(&self, current: Duration) -> Duration {
        let next = current.as_millis() as f64 * self.backoff_multiplier;
        Duration::from_millis((next as u64).min(self.max_interval_ms))
    }

    /// Overall deadline, if any
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }

    fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(invalid("export.poll.interval_ms must be > 0"));
        }
        if !self.backoff_multiplier.is_finite() || self.backoff_multiplier < 1.0 {
            return Err(invalid(format!(
                "export.poll.backoff_multiplier must be >= 1.0, got {}",
                self.backoff_multiplier
            )));
        }
        if self.max_interval_ms < self.interval_ms {
            return Err(invalid(format!(
                "export.poll.max_interval_ms ({}) must be >= interval_ms ({})",
                self.max_interval_ms, self.interval_ms
            )));
        }
        Ok(())
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_poll_interval_ms(),
            max_interval_ms: default_poll_max_interval_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            timeout_seconds: default_poll_timeout_seconds(),
        }
    }
}

/// Response export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Format used when none is given on the command line
    #[serde(default)]
    pub default_format: FileFormat,

    /// Directory the downloaded archive is extracted into
    #[serde(default = "default_destination_dir")]
    pub destination_dir: String,

    /// Poll loop pacing
    #[serde(default)]
    pub poll: PollConfig,
}

impl ExportConfig {
    fn validate(&self) -> Result<()> {
        if self.destination_dir.trim().is_empty() {
            return Err(invalid("export.destination_dir cannot be empty"));
        }
        self.poll.validate()
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: FileFormat::default(),
            destination_dir: default_destination_dir(),
            poll: PollConfig::default(),
        }
    }
}

/// Survey management configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveysConfig {
    /// Listing limit; pagination stops once the page offset exceeds it
    #[serde(default = "default_survey_limit")]
    pub limit: usize,
}

impl SurveysConfig {
    fn validate(&self) -> Result<()> {
        if self.limit < MIN_SURVEY_LIMIT {
            return Err(invalid(format!(
                "surveys.limit must be >= {MIN_SURVEY_LIMIT}, got {}",
                self.limit
            )));
        }
        Ok(())
    }
}

impl Default for SurveysConfig {
    fn default() -> Self {
        Self {
            limit: default_survey_limit(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<()> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(invalid(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            )));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err(invalid("logging.local_path cannot be empty when local_enabled"));
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn invalid(message: impl Into<String>) -> QualtricsError {
    QualtricsError::Configuration(format!("Configuration validation failed: {}", message.into()))
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    10_000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_poll_interval_ms() -> u64 {
    1_000
}

fn default_poll_max_interval_ms() -> u64 {
    10_000
}

fn default_poll_timeout_seconds() -> u64 {
    1_800
}

fn default_destination_dir() -> String {
    DEFAULT_DESTINATION_DIR.to_string()
}

fn default_survey_limit() -> usize {
    500
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

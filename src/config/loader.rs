//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ClientConfig;
use super::secret_string;
use crate::domain::errors::QualtricsError;
use crate::domain::result::Result;
use regex::Regex;
use secrecy::ExposeSecret;
use std::fs;
use std::path::Path;

/// Environment variable that overrides `qualtrics.api_token`
pub const API_TOKEN_ENV: &str = "QUALTRICS_API_TOKEN";

/// Fallback token variable, consulted only when no token is configured
pub const LEGACY_TOKEN_ENV: &str = "QUALTRICS_TOKEN";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ClientConfig
/// 4. Applies environment variable overrides (QUALTRICS_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, a referenced
/// environment variable is missing, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use qualtrics_client::config::load_config;
///
/// let config = load_config("qualtrics.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ClientConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(QualtricsError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        QualtricsError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses and validates configuration from TOML text
///
/// Same pipeline as [`load_config`] minus the file read.
pub fn parse_config(contents: &str) -> Result<ClientConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: ClientConfig = toml::from_str(&contents)
        .map_err(|e| QualtricsError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate()?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| QualtricsError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        // Comment lines keep their placeholders untouched
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(QualtricsError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the QUALTRICS_* prefix
///
/// Variables follow the pattern `QUALTRICS_<SECTION>_<KEY>`, except for the
/// token which uses [`API_TOKEN_ENV`] and falls back to [`LEGACY_TOKEN_ENV`].
fn apply_env_overrides(config: &mut ClientConfig) {
    if let Ok(val) = std::env::var("QUALTRICS_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("QUALTRICS_DATA_CENTER") {
        config.qualtrics.data_center = val;
    }
    if let Ok(val) = std::env::var("QUALTRICS_BASE_URL") {
        config.qualtrics.base_url = Some(val);
    }
    if let Ok(val) = std::env::var("QUALTRICS_TIMEOUT_SECONDS") {
        if let Ok(seconds) = val.parse() {
            config.qualtrics.timeout_seconds = seconds;
        }
    }
    if let Some(val) = non_blank_env(API_TOKEN_ENV) {
        config.qualtrics.api_token = Some(secret_string(val));
    } else if !has_token(config) {
        if let Some(val) = non_blank_env(LEGACY_TOKEN_ENV) {
            tracing::debug!("Using API token from {}", LEGACY_TOKEN_ENV);
            config.qualtrics.api_token = Some(secret_string(val));
        }
    }

    if let Ok(val) = std::env::var("QUALTRICS_EXPORT_DESTINATION_DIR") {
        config.export.destination_dir = val;
    }
    if let Ok(val) = std::env::var("QUALTRICS_EXPORT_POLL_TIMEOUT_SECONDS") {
        if let Ok(seconds) = val.parse() {
            config.export.poll.timeout_seconds = seconds;
        }
    }

    if let Ok(val) = std::env::var("QUALTRICS_SURVEYS_LIMIT") {
        if let Ok(limit) = val.parse() {
            config.surveys.limit = limit;
        }
    }

    if let Ok(val) = std::env::var("QUALTRICS_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("QUALTRICS_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

/// Token variables set to an empty string count as unset
fn non_blank_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|val| !val.trim().is_empty())
}

fn has_token(config: &ClientConfig) -> bool {
    config
        .qualtrics
        .api_token
        .as_ref()
        .is_some_and(|token| !token.expose_secret().is_blank())
}

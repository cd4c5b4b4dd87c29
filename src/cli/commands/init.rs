//! Init command implementation
//!
//! Writes a sample configuration file.

use super::{EXIT_CONFIG_ERROR, EXIT_FATAL, EXIT_SUCCESS};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "qualtrics.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG_ERROR);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        if let Err(e) = fs::write(&self.output, config_content) {
            println!("❌ Failed to write configuration file");
            println!("   Error: {e}");
            return Ok(EXIT_FATAL);
        }

        println!("✅ Configuration file created: {}", self.output);
        println!();
        println!("Next steps:");
        println!("  1. Set data_center in {} to your account's data center", self.output);
        println!("  2. Export QUALTRICS_API_TOKEN (or QUALTRICS_TOKEN) or add it to a .env file");
        println!("  3. Validate configuration: qualtrics validate-config");
        println!("  4. Run an export: qualtrics export <SURVEY_ID>");
        println!();
        Ok(EXIT_SUCCESS)
    }

    fn generate_minimal_config() -> &'static str {
        r#"# Qualtrics client configuration

[application]
log_level = "info"

[qualtrics]
data_center = "fra1"  # fra1 | ca1 | iad1 | sjc1 | syd1 | gov1
# api_token is read from QUALTRICS_API_TOKEN, or QUALTRICS_TOKEN

[export]
default_format = "csv"
destination_dir = "MyQualtricsDownload"

[surveys]
limit = 500
"#
    }

    fn generate_config_with_examples() -> &'static str {
        r#"# Qualtrics client configuration
#
# Values of the form ${VAR} are replaced with environment variables when the
# file is loaded. Any QUALTRICS_<SECTION>_<KEY> variable overrides the value
# in this file.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
log_level = "info"

# ============================================================================
# Qualtrics API
# ============================================================================
[qualtrics]
# Data center of the account (fra1, ca1, iad1, sjc1, syd1, gov1)
data_center = "fra1"

# API token; QUALTRICS_API_TOKEN overrides it and QUALTRICS_TOKEN is used
# when neither is set. Leave it out to take the token from the environment.
# api_token = "${QUALTRICS_API_TOKEN}"

# Base URL override for proxies; derived from data_center when unset
# base_url = "https://fra1.qualtrics.com/API/v3/"

# Per-request timeout in seconds
timeout_seconds = 10

[qualtrics.retry]
# Retries for connection failures and timeouts (HTTP errors are not retried)
max_retries = 3
initial_delay_ms = 500
max_delay_ms = 10000
backoff_multiplier = 2.0

# ============================================================================
# Response Export
# ============================================================================
[export]
# Format used when --format is not given (csv, tsv, xml, json, ndjson, spss)
default_format = "csv"

# Directory the export archive is extracted into; existing files are overwritten
destination_dir = "MyQualtricsDownload"

[export.poll]
# Delay after the first progress poll, in milliseconds
interval_ms = 1000

# Upper bound for the delay between polls
max_interval_ms = 10000

# Growth factor of the delay after each poll
backoff_multiplier = 2.0

# Give up after this many seconds (0 waits forever)
timeout_seconds = 1800

# ============================================================================
# Survey Management
# ============================================================================
[surveys]
# Paging stops once the next offset exceeds this limit (minimum 100)
limit = 500

# ============================================================================
# Logging
# ============================================================================
[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "logs"

# Rotation (daily, hourly, never)
local_rotation = "daily"
"#
    }
}

//! Validate config command implementation
//!
//! Loads and validates the configuration file without contacting Qualtrics.

use super::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::config::load_config;
use crate::domain::DataCenter;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let base_url = match config.qualtrics.base_url {
            Some(ref base_url) => base_url.clone(),
            None => config.qualtrics.data_center.parse::<DataCenter>()?.base_url(),
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Data Center: {}", config.qualtrics.data_center);
        println!("  API Base URL: {base_url}");
        println!("  API Token: set");
        println!("  Request Timeout: {}s", config.qualtrics.timeout_seconds);
        println!("  Max Retries: {}", config.qualtrics.retry.max_retries);
        println!("  Default Format: {}", config.export.default_format);
        println!("  Destination: {}", config.export.destination_dir);
        println!(
            "  Poll Interval: {}ms (max {}ms)",
            config.export.poll.interval_ms, config.export.poll.max_interval_ms
        );
        match config.export.poll.timeout() {
            Some(timeout) => println!("  Poll Timeout: {}s", timeout.as_secs()),
            None => println!("  Poll Timeout: none"),
        }
        println!("  Survey Limit: {}", config.surveys.limit);
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );
        println!();

        Ok(EXIT_SUCCESS)
    }
}

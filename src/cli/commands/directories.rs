//! Directories command implementation

use super::{connect, report_error, EXIT_SUCCESS};
use clap::Args;

/// Arguments for the directories command
#[derive(Args, Debug)]
pub struct DirectoriesArgs {}

impl DirectoriesArgs {
    /// Execute the directories command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (_, client) = match connect(config_path) {
            Ok(connected) => connected,
            Err(code) => return Ok(code),
        };

        let directories = match client.list_directories().await {
            Ok(directories) => directories,
            Err(e) => return Ok(report_error(&e, "Failed to list directories")),
        };

        println!("{:<24} {:<10} {:<8} NAME", "DIRECTORY ID", "CONTACTS", "DEFAULT");
        for directory in &directories {
            println!(
                "{:<24} {:<10} {:<8} {}",
                directory.directory_id,
                directory
                    .contact_count
                    .map(|count| count.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                directory.is_default.unwrap_or(false),
                directory.name
            );
        }

        Ok(EXIT_SUCCESS)
    }
}

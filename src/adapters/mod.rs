//! External system integrations for the Qualtrics client.
//!
//! - [`qualtrics`] - Qualtrics v3 REST API (response export, surveys, directories)
//! - [`archive`] - Extraction of downloaded export archives
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits
//! ([`qualtrics::ResponseExportApi`], [`archive::ArchiveExtractor`]) so the
//! export workflow can be tested with scripted implementations.
//!
//! ```rust,no_run
//! use qualtrics_client::adapters::qualtrics::QualtricsClient;
//! use qualtrics_client::config::{secret_string, QualtricsConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = QualtricsConfig::new("ca1", Some(secret_string("token".to_string())));
//! let client = QualtricsClient::new(config)?;
//! for directory in client.list_directories().await? {
//!     println!("{} {}", directory.directory_id, directory.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod qualtrics;

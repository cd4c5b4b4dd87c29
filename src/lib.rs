// qualtrics-client - Qualtrics survey and response export client
// Copyright (c) 2025 qualtrics-client Contributors
// Licensed under the MIT License

//! # qualtrics-client
//!
//! A thin client for the Qualtrics v3 REST API whose core is the
//! asynchronous response export: submit an export job, poll its progress,
//! download the finished archive and unpack it locally.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export workflow
//! - [`adapters`] - Qualtrics REST API and archive extraction
//! - [`domain`] - Identifiers, export types, survey records and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qualtrics_client::adapters::qualtrics::QualtricsClient;
//! use qualtrics_client::config::load_config;
//! use qualtrics_client::core::export::ExportWorkflow;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("qualtrics.toml")?;
//!     let client = QualtricsClient::new(config.qualtrics.clone())?;
//!
//!     let workflow = ExportWorkflow::from_client(client, &config.export);
//!     let summary = workflow.export_survey("SV_0c9ZqP7gdG4SvrD", "csv", None).await?;
//!
//!     println!("Extracted {} files", summary.extracted_files.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Survey Management
//!
//! ```rust,no_run
//! use qualtrics_client::adapters::qualtrics::QualtricsClient;
//! use qualtrics_client::config::{secret_string, QualtricsConfig};
//! use qualtrics_client::domain::SurveyId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = QualtricsConfig::new("iad1", Some(secret_string("token".to_string())));
//! let client = QualtricsClient::new(config)?;
//!
//! for survey in client.list_surveys(200).await? {
//!     if !survey.is_active {
//!         println!("{} is inactive", survey.name);
//!     }
//! }
//!
//! client.deactivate_survey(&SurveyId::new("SV_1")?).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All library operations return [`domain::Result`], whose error type is
//! [`domain::QualtricsError`]:
//!
//! ```rust
//! use qualtrics_client::adapters::qualtrics::QualtricsClient;
//! use qualtrics_client::config::{secret_string, QualtricsConfig};
//! use qualtrics_client::domain::QualtricsError;
//!
//! let config = QualtricsConfig::new("xx1", Some(secret_string("token".to_string())));
//! let err = QualtricsClient::new(config).unwrap_err();
//! assert!(matches!(err, QualtricsError::InvalidDataCenter(_)));
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;

//! Core business logic for the Qualtrics client.
//!
//! # Modules
//!
//! - [`export`] - Response export workflow and summary
//!
//! # Export Workflow
//!
//! 1. **Submit**: POST the export job and receive a progress id
//! 2. **Poll**: GET the progress until the status is `complete` or contains `failed`
//! 3. **Fetch**: download the archive identified by the file id
//! 4. **Extract**: unpack the archive into the destination directory
//!
//! # Example
//!
//! ```rust,no_run
//! use qualtrics_client::adapters::qualtrics::QualtricsClient;
//! use qualtrics_client::config::load_config;
//! use qualtrics_client::core::export::ExportWorkflow;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("qualtrics.toml")?;
//!
//! // Create shutdown signal
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//! let client = QualtricsClient::new(config.qualtrics.clone())?;
//! let workflow = ExportWorkflow::from_client(client, &config.export)
//!     .with_shutdown_signal(shutdown_rx);
//!
//! let summary = workflow.export_survey("SV_0c9ZqP7gdG4SvrD", "csv", None).await?;
//! println!("Downloaded {} bytes", summary.bytes_downloaded);
//! # Ok(())
//! # }
//! ```

pub mod export;

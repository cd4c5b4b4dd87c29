//! Domain models and types for the Qualtrics client.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`SurveyId`], [`ProgressId`], [`FileId`], [`FilterId`])
//! - **Export types** ([`ExportJob`], [`ExportProgress`], [`ExportStatus`], [`FileFormat`])
//! - **Survey records** ([`Survey`], [`SurveyFilter`], [`Directory`])
//! - **Error types** ([`QualtricsError`], [`ApiError`]) and the [`Result`] alias
//!
//! # Type Safety
//!
//! ```rust
//! use qualtrics_client::domain::{FileFormat, QualtricsError, SurveyId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let survey_id = SurveyId::new("SV_0c9ZqP7gdG4SvrD")?;
//! let format: FileFormat = "ndjson".parse()?;
//!
//! // Unsupported formats are rejected before anything touches the network
//! assert!(matches!(
//!     "pdf".parse::<FileFormat>(),
//!     Err(QualtricsError::UnsupportedFormat(_))
//! ));
//! # Ok(())
//! # }
//! ```

pub mod data_center;
pub mod errors;
pub mod export;
pub mod ids;
pub mod result;
pub mod survey;

pub use data_center::DataCenter;
pub use errors::{ApiError, QualtricsError};
pub use export::{ExportJob, ExportPhase, ExportProgress, ExportStatus, FileFormat};
pub use ids::{FileId, FilterId, ProgressId, SurveyId};
pub use result::Result;
pub use survey::{Directory, Survey, SurveyFilter};

//! Response export API trait
//!
//! The export workflow depends on this trait rather than on
//! [`QualtricsClient`](super::QualtricsClient) directly, so it can be driven
//! by a scripted implementation in tests.

use crate::domain::ids::{FileId, ProgressId, SurveyId};
use crate::domain::{ExportJob, ExportProgress, Result};
use async_trait::async_trait;

/// The three calls of the asynchronous response export
///
/// # Example
///
/// ```no_run
/// use qualtrics_client::adapters::qualtrics::{QualtricsClient, ResponseExportApi};
/// use qualtrics_client::config::{secret_string, QualtricsConfig};
/// use qualtrics_client::domain::{ExportJob, FileFormat, SurveyId};
///
/// # async fn example() -> qualtrics_client::domain::Result<()> {
/// let config = QualtricsConfig::new("fra1", Some(secret_string("token".to_string())));
/// let client = QualtricsClient::new(config)?;
///
/// let survey_id = SurveyId::new("SV_1").unwrap();
/// let job = ExportJob::new(survey_id.clone(), FileFormat::Csv);
/// let progress_id = client.start_response_export(&job).await?;
/// let progress = client
///     .get_response_export_progress(&survey_id, &progress_id)
///     .await?;
/// println!("{}% complete", progress.percent_complete);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ResponseExportApi: Send + Sync {
    /// Submit an export job and return its progress handle
    async fn start_response_export(&self, job: &ExportJob) -> Result<ProgressId>;

    /// Poll an export job once
    async fn get_response_export_progress(
        &self,
        survey_id: &SurveyId,
        progress_id: &ProgressId,
    ) -> Result<ExportProgress>;

    /// Download the finished export archive
    async fn get_response_export_file(
        &self,
        survey_id: &SurveyId,
        file_id: &FileId,
    ) -> Result<Vec<u8>>;
}

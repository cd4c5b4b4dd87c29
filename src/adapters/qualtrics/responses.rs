//! Response export and filter endpoints

use super::api::ResponseExportApi;
use super::client::{decode_result, transport_error, QualtricsClient};
use super::endpoints;
use super::models::{ExportProgressResult, ListResult, StartExportResult};
use crate::domain::ids::{FileId, ProgressId, SurveyId};
use crate::domain::{ExportJob, ExportProgress, Result, SurveyFilter};
use async_trait::async_trait;
use reqwest::Method;

#[async_trait]
impl ResponseExportApi for QualtricsClient {
    async fn start_response_export(&self, job: &ExportJob) -> Result<ProgressId> {
        let body = job.request_body();
        let path = endpoints::export_responses(&job.survey_id);

        tracing::debug!(
            survey_id = %job.survey_id,
            format = %job.file_format,
            filter_id = job.filter_id.as_ref().map(|f| f.as_str()),
            "Submitting response export"
        );

        let response = self
            .request(Method::POST, &path, |builder| builder.json(&body))
            .await?;
        let result: StartExportResult = decode_result(response).await?;

        Ok(result.progress_id)
    }

    async fn get_response_export_progress(
        &self,
        survey_id: &SurveyId,
        progress_id: &ProgressId,
    ) -> Result<ExportProgress> {
        let path = endpoints::export_progress(survey_id, progress_id);
        let result: ExportProgressResult = self.get_result(&path, &[]).await?;

        Ok(ExportProgress {
            progress_id: progress_id.clone(),
            percent_complete: result.percent_complete,
            status: result.status,
            file_id: result.file_id,
        })
    }

    async fn get_response_export_file(
        &self,
        survey_id: &SurveyId,
        file_id: &FileId,
    ) -> Result<Vec<u8>> {
        let path = endpoints::export_file(survey_id, file_id);
        let response = self.request(Method::GET, &path, |builder| builder).await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(&self.endpoint_url(&path), e))?;

        tracing::debug!(
            survey_id = %survey_id,
            file_id = %file_id,
            bytes = bytes.len(),
            "Downloaded export file"
        );

        Ok(bytes.to_vec())
    }
}

impl QualtricsClient {
    /// List the saved response filters of a survey
    pub async fn list_filters(&self, survey_id: &SurveyId) -> Result<Vec<SurveyFilter>> {
        let path = endpoints::filters(survey_id);
        let result: ListResult<SurveyFilter> = self.get_result(&path, &[]).await?;

        tracing::debug!(
            survey_id = %survey_id,
            count = result.elements.len(),
            "Listed survey filters"
        );

        Ok(result.elements)
    }
}

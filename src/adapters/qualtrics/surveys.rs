//! Survey and directory management endpoints

use super::client::QualtricsClient;
use super::endpoints::{self, PAGE_SIZE};
use super::models::{ListResult, SurveyActivation};
use crate::config::schema::MIN_SURVEY_LIMIT;
use crate::domain::ids::SurveyId;
use crate::domain::{ApiError, Directory, QualtricsError, Result, Survey};
use reqwest::Method;
use url::Url;

impl QualtricsClient {
    /// List surveys, following `nextPage` links until the offset passes `limit`
    ///
    /// # Errors
    ///
    /// [`QualtricsError::MinimumSurveyCount`] when `limit` is below one page;
    /// no request is sent in that case.
    pub async fn list_surveys(&self, limit: usize) -> Result<Vec<Survey>> {
        if limit < MIN_SURVEY_LIMIT {
            return Err(QualtricsError::MinimumSurveyCount {
                requested: limit,
                minimum: MIN_SURVEY_LIMIT,
            });
        }

        tracing::debug!(limit, page = 1, "Listing surveys");
        let first: ListResult<Survey> = self.get_result(endpoints::SURVEYS, &[]).await?;
        let mut surveys = first.elements;

        if limit <= PAGE_SIZE {
            return Ok(surveys);
        }

        let mut next_page = first.next_page;
        while let Some(link) = next_page {
            let offset = offset_from_next_page(&link)?;
            if offset > limit {
                break;
            }

            tracing::debug!(offset, page = offset / PAGE_SIZE + 1, "Listing surveys");
            let page: ListResult<Survey> = self
                .get_result(endpoints::SURVEYS, &[("offset", offset.to_string())])
                .await?;

            surveys.extend(page.elements);
            next_page = page.next_page;
        }

        tracing::info!(count = surveys.len(), "Listed surveys");
        Ok(surveys)
    }

    /// Survey definition as returned by the API
    pub async fn get_survey(&self, survey_id: &SurveyId) -> Result<serde_json::Value> {
        self.get_result(&endpoints::survey(survey_id), &[]).await
    }

    pub async fn deactivate_survey(&self, survey_id: &SurveyId) -> Result<()> {
        self.set_survey_active(survey_id, false).await?;
        tracing::info!(survey_id = %survey_id, "Survey deactivated");
        Ok(())
    }

    pub async fn activate_survey(&self, survey_id: &SurveyId) -> Result<()> {
        self.set_survey_active(survey_id, true).await?;
        tracing::info!(survey_id = %survey_id, "Survey activated");
        Ok(())
    }

    pub async fn delete_survey(&self, survey_id: &SurveyId) -> Result<()> {
        self.request(Method::DELETE, &endpoints::survey(survey_id), |builder| {
            builder
        })
        .await?;
        tracing::info!(survey_id = %survey_id, "Survey deleted");
        Ok(())
    }

    /// List the contact directories visible to the token
    pub async fn list_directories(&self) -> Result<Vec<Directory>> {
        let result: ListResult<Directory> =
            self.get_result(endpoints::DIRECTORIES, &[]).await?;
        Ok(result.elements)
    }

    async fn set_survey_active(&self, survey_id: &SurveyId, is_active: bool) -> Result<()> {
        let body = SurveyActivation { is_active };
        self.request(Method::PUT, &endpoints::survey(survey_id), |builder| {
            builder.json(&body)
        })
        .await?;
        Ok(())
    }
}

/// Extract the `offset` query parameter of a `nextPage` link
fn offset_from_next_page(link: &str) -> Result<usize> {
    let url = Url::parse(link)
        .map_err(|e| ApiError::InvalidResponse(format!("Invalid nextPage link {link}: {e}")))?;

    let offset = url
        .query_pairs()
        .find(|(key, _)| key == "offset")
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| {
            ApiError::InvalidResponse(format!("nextPage link {link} has no offset parameter"))
        })?;

    offset.parse().map_err(|_| {
        ApiError::InvalidResponse(format!("nextPage offset '{offset}' is not a number")).into()
    })
}

//! Filters command implementation

use super::{connect, report_error, EXIT_SUCCESS};
use crate::domain::{QualtricsError, SurveyId};
use clap::Args;

/// Arguments for the filters command
#[derive(Args, Debug)]
pub struct FiltersArgs {
    /// Survey whose saved response filters are listed
    pub survey_id: String,
}

impl FiltersArgs {
    /// Execute the filters command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let survey_id = match SurveyId::new(self.survey_id.as_str()) {
            Ok(id) => id,
            Err(e) => return Ok(report_error(&QualtricsError::Validation(e), "Invalid survey id")),
        };

        let (_, client) = match connect(config_path) {
            Ok(connected) => connected,
            Err(code) => return Ok(code),
        };

        let filters = match client.list_filters(&survey_id).await {
            Ok(filters) => filters,
            Err(e) => return Ok(report_error(&e, "Failed to list filters")),
        };

        if filters.is_empty() {
            println!("Survey {survey_id} has no saved filters");
            return Ok(EXIT_SUCCESS);
        }

        println!("{:<40} {:<20} NAME", "FILTER ID", "CREATED");
        for filter in &filters {
            println!(
                "{:<40} {:<20} {}",
                filter.filter_id.as_str(),
                filter.creation_date.format("%Y-%m-%d %H:%M:%S").to_string(),
                filter.filter_name
            );
        }

        Ok(EXIT_SUCCESS)
    }
}

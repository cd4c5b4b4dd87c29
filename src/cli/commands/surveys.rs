//! Survey management commands

use super::{connect, report_error, EXIT_SUCCESS};
use crate::domain::{QualtricsError, SurveyId};
use clap::{Args, Subcommand};
use std::io::{self, Write};

/// Arguments for the surveys command
#[derive(Args, Debug)]
pub struct SurveysArgs {
    #[command(subcommand)]
    pub command: SurveysCommand,
}

#[derive(Subcommand, Debug)]
pub enum SurveysCommand {
    /// List surveys
    List {
        /// Stop paging once the offset exceeds this limit (minimum 100); defaults to surveys.limit
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print a survey definition as JSON
    Get { survey_id: String },

    /// Activate a survey
    Activate { survey_id: String },

    /// Deactivate a survey
    Deactivate { survey_id: String },

    /// Delete a survey
    Delete {
        survey_id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl SurveysArgs {
    /// Execute the surveys command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (config, client) = match connect(config_path) {
            Ok(connected) => connected,
            Err(code) => return Ok(code),
        };

        match &self.command {
            SurveysCommand::List { limit } => {
                let limit = limit.unwrap_or(config.surveys.limit);
                let surveys = match client.list_surveys(limit).await {
                    Ok(surveys) => surveys,
                    Err(e) => return Ok(report_error(&e, "Failed to list surveys")),
                };

                println!("{:<20} {:<8} {:<20} NAME", "ID", "ACTIVE", "LAST MODIFIED");
                for survey in &surveys {
                    println!(
                        "{:<20} {:<8} {:<20} {}",
                        survey.id.as_str(),
                        survey.is_active,
                        survey.last_modified.format("%Y-%m-%d %H:%M:%S").to_string(),
                        survey.name
                    );
                }
                println!();
                println!("{} surveys", surveys.len());
            }
            SurveysCommand::Get { survey_id } => {
                let survey_id = match parse_survey_id(survey_id) {
                    Ok(id) => id,
                    Err(code) => return Ok(code),
                };
                let definition = match client.get_survey(&survey_id).await {
                    Ok(definition) => definition,
                    Err(e) => return Ok(report_error(&e, "Failed to get survey")),
                };
                println!("{}", serde_json::to_string_pretty(&definition)?);
            }
            SurveysCommand::Activate { survey_id } => {
                let survey_id = match parse_survey_id(survey_id) {
                    Ok(id) => id,
                    Err(code) => return Ok(code),
                };
                if let Err(e) = client.activate_survey(&survey_id).await {
                    return Ok(report_error(&e, "Failed to activate survey"));
                }
                println!("✅ Survey {survey_id} activated");
            }
            SurveysCommand::Deactivate { survey_id } => {
                let survey_id = match parse_survey_id(survey_id) {
                    Ok(id) => id,
                    Err(code) => return Ok(code),
                };
                if let Err(e) = client.deactivate_survey(&survey_id).await {
                    return Ok(report_error(&e, "Failed to deactivate survey"));
                }
                println!("✅ Survey {survey_id} deactivated");
            }
            SurveysCommand::Delete { survey_id, yes } => {
                let survey_id = match parse_survey_id(survey_id) {
                    Ok(id) => id,
                    Err(code) => return Ok(code),
                };

                if !yes {
                    print!("Delete survey {survey_id}? This cannot be undone. [y/N]: ");
                    io::stdout().flush()?;

                    let mut input = String::new();
                    io::stdin().read_line(&mut input)?;

                    if !input.trim().eq_ignore_ascii_case("y") {
                        println!("Delete cancelled.");
                        return Ok(EXIT_SUCCESS);
                    }
                }

                if let Err(e) = client.delete_survey(&survey_id).await {
                    return Ok(report_error(&e, "Failed to delete survey"));
                }
                println!("✅ Survey {survey_id} deleted");
            }
        }

        Ok(EXIT_SUCCESS)
    }
}

fn parse_survey_id(raw: &str) -> Result<SurveyId, i32> {
    SurveyId::new(raw).map_err(|e| report_error(&QualtricsError::Validation(e), "Invalid survey id"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::EXIT_CONFIG_ERROR;

    #[test]
    fn test_parse_survey_id() {
        assert_eq!(parse_survey_id("SV_1").unwrap().as_str(), "SV_1");
        assert_eq!(parse_survey_id("").unwrap_err(), EXIT_CONFIG_ERROR);
    }
}

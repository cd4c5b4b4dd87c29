//! Export command implementation
//!
//! Runs one response export and extracts the archive into the destination
//! directory.

use super::{connect, report_error, EXIT_SUCCESS};
use crate::core::export::ExportWorkflow;
use crate::domain::{ExportJob, FileFormat, FilterId, QualtricsError, SurveyId};
use clap::Args;
use serde_json::Value;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Survey to export (e.g. SV_0c9ZqP7gdG4SvrD)
    pub survey_id: String,

    /// Output format (csv, tsv, xml, json, ndjson, spss); defaults to export.default_format
    #[arg(short, long)]
    pub format: Option<String>,

    /// Saved response filter to apply
    #[arg(long)]
    pub filter_id: Option<String>,

    /// Extra export option as KEY=VALUE, VALUE parsed as JSON when possible
    #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, Value)>,

    /// Override export.destination_dir
    #[arg(short, long)]
    pub destination: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(survey_id = %self.survey_id, "Starting export command");

        let (config, client) = match connect(config_path) {
            Ok(connected) => connected,
            Err(code) => return Ok(code),
        };

        let job = match self.build_job(config.export.default_format) {
            Ok(job) => job,
            Err(e) => return Ok(report_error(&e, "Invalid export request")),
        };

        let mut workflow =
            ExportWorkflow::from_client(client, &config.export).with_shutdown_signal(shutdown_signal);
        if let Some(ref destination) = self.destination {
            tracing::info!(destination = %destination, "Overriding destination from CLI");
            workflow = workflow.with_destination(destination);
        }

        println!(
            "🚀 Exporting {} as {} into {}",
            job.survey_id,
            job.file_format,
            workflow.destination().display()
        );

        let summary = match workflow.run(&job).await {
            Ok(summary) => summary,
            Err(e) => return Ok(report_error(&e, "Export failed")),
        };
        summary.log_summary();

        println!();
        println!("📊 Export Summary:");
        println!("  Survey: {}", summary.survey_id);
        println!("  Format: {}", summary.file_format);
        println!("  Progress ID: {}", summary.progress_id);
        println!("  File ID: {}", summary.file_id);
        println!("  Downloaded: {} bytes", summary.bytes_downloaded);
        println!("  Destination: {}", summary.destination.display());
        for path in &summary.extracted_files {
            println!("    - {}", path.display());
        }
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();
        println!("✅ Export completed successfully!");

        Ok(EXIT_SUCCESS)
    }

    /// Validate the arguments into an export job
    ///
    /// The format is parsed first so an unsupported one fails before the
    /// identifiers are looked at.
    fn build_job(&self, default_format: FileFormat) -> crate::domain::Result<ExportJob> {
        let file_format = match self.format {
            Some(ref format) => format.parse()?,
            None => default_format,
        };

        let survey_id = SurveyId::new(self.survey_id.as_str()).map_err(QualtricsError::Validation)?;
        let mut job = ExportJob::new(survey_id, file_format);

        if let Some(ref filter_id) = self.filter_id {
            let filter_id = FilterId::new(filter_id.as_str()).map_err(QualtricsError::Validation)?;
            job = job.with_filter_id(filter_id);
        }

        for (key, value) in &self.fields {
            job = job.with_extra_field(key.clone(), value.clone());
        }

        Ok(job)
    }
}

/// Parse a `KEY=VALUE` export option
fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

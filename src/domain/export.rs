//! Response export domain types
//!
//! An export runs through a small lifecycle on the Qualtrics side: the job is
//! submitted, polled until it reaches a terminal status, and the resulting
//! archive is downloaded. The types here describe one job and the snapshots
//! observed while polling it.

use super::errors::QualtricsError;
use super::ids::{FileId, FilterId, ProgressId, SurveyId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Status literal that ends polling successfully
pub const STATUS_COMPLETE: &str = "complete";

/// Marker whose presence anywhere in a status ends polling with an error
pub const STATUS_FAILED_MARKER: &str = "failed";

/// Status literal reported while the job is running
pub const STATUS_IN_PROGRESS: &str = "inProgress";

/// File formats accepted by the export endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    #[default]
    Csv,
    Tsv,
    Xml,
    Json,
    Ndjson,
    Spss,
}

impl FileFormat {
    /// All supported formats
    pub const ALL: [FileFormat; 6] = [
        FileFormat::Csv,
        FileFormat::Tsv,
        FileFormat::Xml,
        FileFormat::Json,
        FileFormat::Ndjson,
        FileFormat::Spss,
    ];

    /// Wire value for the `format` body field
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Tsv => "tsv",
            FileFormat::Xml => "xml",
            FileFormat::Json => "json",
            FileFormat::Ndjson => "ndjson",
            FileFormat::Spss => "spss",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileFormat {
    type Err = QualtricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileFormat::ALL
            .iter()
            .copied()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| QualtricsError::UnsupportedFormat(s.to_string()))
    }
}

/// One response export request
///
/// # Example
///
/// ```
/// use qualtrics_client::domain::export::{ExportJob, FileFormat};
/// use qualtrics_client::domain::ids::{FilterId, SurveyId};
///
/// let job = ExportJob::new(SurveyId::new("SV_1").unwrap(), FileFormat::Csv)
///     .with_filter_id(FilterId::new("filter-1").unwrap())
///     .with_extra_field("useLabels", serde_json::json!(true));
///
/// let body = job.request_body();
/// assert_eq!(body["format"], "csv");
/// assert_eq!(body["filterId"], "filter-1");
/// assert_eq!(body["useLabels"], true);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExportJob {
    /// Survey whose responses are exported
    pub survey_id: SurveyId,

    /// Output format
    pub file_format: FileFormat,

    /// Optional saved filter
    pub filter_id: Option<FilterId>,

    /// Additional body fields (e.g. `startDate`, `useLabels`)
    pub extra_fields: Map<String, Value>,
}

impl ExportJob {
    /// Create a job with no filter and no extra fields
    pub fn new(survey_id: SurveyId, file_format: FileFormat) -> Self {
        Self {
            survey_id,
            file_format,
            filter_id: None,
            extra_fields: Map::new(),
        }
    }

    /// Set the filter
    pub fn with_filter_id(mut self, filter_id: FilterId) -> Self {
        self.filter_id = Some(filter_id);
        self
    }

    /// Add one extra body field
    pub fn with_extra_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra_fields.insert(key.into(), value);
        self
    }

    /// Add several extra body fields
    pub fn with_extra_fields(mut self, fields: Map<String, Value>) -> Self {
        self.extra_fields.extend(fields);
        self
    }

    /// Build the JSON body for the export-initiation request
    ///
    /// `format` and, when set, `filterId` are always taken from the job.
    /// Extra fields are merged only for keys not already present.
    pub fn request_body(&self) -> Value {
        let mut body = Map::new();
        body.insert(
            "format".to_string(),
            Value::String(self.file_format.as_str().to_string()),
        );
        if let Some(ref filter_id) = self.filter_id {
            body.insert(
                "filterId".to_string(),
                Value::String(filter_id.as_str().to_string()),
            );
        }

        for (key, value) in &self.extra_fields {
            body.entry(key.clone()).or_insert_with(|| value.clone());
        }

        Value::Object(body)
    }
}

/// Export job status as reported by the progress endpoint
///
/// The vocabulary is open: unknown values are kept verbatim as [`ExportStatus::Other`]
/// and keep the poll loop going.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExportStatus {
    InProgress,
    Complete,
    /// Any status containing the failed marker, e.g. `failed` or `export_failed`
    Failed(String),
    Other(String),
}

impl ExportStatus {
    /// Complete or failed
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExportStatus::Complete | ExportStatus::Failed(_))
    }

    /// Wire value
    pub fn as_str(&self) -> &str {
        match self {
            ExportStatus::InProgress => STATUS_IN_PROGRESS,
            ExportStatus::Complete => STATUS_COMPLETE,
            ExportStatus::Failed(s) | ExportStatus::Other(s) => s,
        }
    }
}

impl From<String> for ExportStatus {
    fn from(status: String) -> Self {
        if status == STATUS_COMPLETE {
            ExportStatus::Complete
        } else if status.contains(STATUS_FAILED_MARKER) {
            ExportStatus::Failed(status)
        } else if status == STATUS_IN_PROGRESS {
            ExportStatus::InProgress
        } else {
            ExportStatus::Other(status)
        }
    }
}

impl From<&str> for ExportStatus {
    fn from(status: &str) -> Self {
        ExportStatus::from(status.to_string())
    }
}

impl From<ExportStatus> for String {
    fn from(status: ExportStatus) -> Self {
        match status {
            ExportStatus::Failed(s) | ExportStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot returned by one progress poll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportProgress {
    /// Job handle, identical for every snapshot of the same job
    pub progress_id: ProgressId,

    /// 0 to 100
    pub percent_complete: f64,

    pub status: ExportStatus,

    /// Present once the job is complete
    pub file_id: Option<FileId>,
}

/// Lifecycle phase of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportPhase {
    Idle,
    Submitted,
    Polling,
    Completed,
    Failed,
    Fetched,
    Extracted,
}

impl ExportPhase {
    /// Whether no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExportPhase::Failed | ExportPhase::Extracted)
    }
}

impl fmt::Display for ExportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportPhase::Idle => "idle",
            ExportPhase::Submitted => "submitted",
            ExportPhase::Polling => "polling",
            ExportPhase::Completed => "completed",
            ExportPhase::Failed => "failed",
            ExportPhase::Fetched => "fetched",
            ExportPhase::Extracted => "extracted",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn survey() -> SurveyId {
        SurveyId::new("SV_1").unwrap()
    }

    #[test_case("csv", FileFormat::Csv)]
    #[test_case("tsv", FileFormat::Tsv)]
    #[test_case("xml", FileFormat::Xml)]
    #[test_case("json", FileFormat::Json)]
    #[test_case("ndjson", FileFormat::Ndjson)]
    #[test_case("spss", FileFormat::Spss)]
    fn test_parse_supported_format(input: &str, expected: FileFormat) {
        assert_eq!(input.parse::<FileFormat>().unwrap(), expected);
    }

    #[test_case("pdf")]
    #[test_case("CSV")]
    #[test_case("")]
    fn test_parse_unsupported_format(input: &str) {
        let err = input.parse::<FileFormat>().unwrap_err();
        assert!(matches!(err, QualtricsError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_request_body_format_only() {
        let body = ExportJob::new(survey(), FileFormat::Spss).request_body();
        assert_eq!(body, json!({"format": "spss"}));
    }

    #[test]
    fn test_request_body_with_filter() {
        let body = ExportJob::new(survey(), FileFormat::Csv)
            .with_filter_id(FilterId::new("F-1").unwrap())
            .request_body();
        assert_eq!(body, json!({"format": "csv", "filterId": "F-1"}));
    }

    #[test]
    fn test_extra_fields_do_not_override_reserved_keys() {
        let body = ExportJob::new(survey(), FileFormat::Csv)
            .with_filter_id(FilterId::new("F-1").unwrap())
            .with_extra_field("format", json!("xml"))
            .with_extra_field("filterId", json!("F-2"))
            .with_extra_field("compress", json!(false))
            .request_body();

        assert_eq!(
            body,
            json!({"format": "csv", "filterId": "F-1", "compress": false})
        );
    }

    #[test]
    fn test_extra_filter_id_used_when_job_has_none() {
        let body = ExportJob::new(survey(), FileFormat::Json)
            .with_extra_field("filterId", json!("F-9"))
            .request_body();
        assert_eq!(body, json!({"format": "json", "filterId": "F-9"}));
    }

    #[test_case("complete", ExportStatus::Complete)]
    #[test_case("inProgress", ExportStatus::InProgress)]
    #[test_case("failed", ExportStatus::Failed("failed".to_string()))]
    #[test_case("export_failed", ExportStatus::Failed("export_failed".to_string()))]
    #[test_case("queued", ExportStatus::Other("queued".to_string()))]
    #[test_case("Complete", ExportStatus::Other("Complete".to_string()))]
    fn test_status_classification(raw: &str, expected: ExportStatus) {
        assert_eq!(ExportStatus::from(raw), expected);
    }

    #[test]
    fn test_status_terminal() {
        assert!(ExportStatus::Complete.is_terminal());
        assert!(ExportStatus::from("failed").is_terminal());
        assert!(!ExportStatus::InProgress.is_terminal());
        assert!(!ExportStatus::from("queued").is_terminal());
    }

    #[test]
    fn test_status_serde_keeps_raw_value() {
        let status: ExportStatus = serde_json::from_str("\"export_failed\"").unwrap();
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"export_failed\"");
    }

    #[test]
    fn test_phase_terminal() {
        assert!(ExportPhase::Extracted.is_terminal());
        assert!(ExportPhase::Failed.is_terminal());
        assert!(!ExportPhase::Polling.is_terminal());
        assert_eq!(ExportPhase::Fetched.to_string(), "fetched");
    }
}

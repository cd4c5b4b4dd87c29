//! Export summary and reporting

use crate::domain::ids::{FileId, ProgressId, SurveyId};
use crate::domain::{ExportPhase, FileFormat};
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of one completed response export
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub survey_id: SurveyId,

    pub file_format: FileFormat,

    /// Handle issued at submission
    pub progress_id: ProgressId,

    /// Handle of the downloaded archive
    pub file_id: FileId,

    /// Final lifecycle phase
    pub phase: ExportPhase,

    /// Size of the downloaded archive
    pub bytes_downloaded: usize,

    /// Directory the archive was extracted into
    pub destination: PathBuf,

    /// Paths of the extracted files
    pub extracted_files: Vec<PathBuf>,

    /// Wall-clock time from submission to extraction
    pub duration: Duration,
}

impl ExportSummary {
    /// Whether the archive was unpacked
    pub fn is_successful(&self) -> bool {
        self.phase == ExportPhase::Extracted
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            survey_id = %self.survey_id,
            format = %self.file_format,
            progress_id = %self.progress_id,
            file_id = %self.file_id,
            phase = %self.phase,
            bytes = self.bytes_downloaded,
            files = self.extracted_files.len(),
            destination = %self.destination.display(),
            duration_ms = self.duration.as_millis() as u64,
            "Export summary"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_success_depends_on_phase() {
        let mut summary = ExportSummary {
            survey_id: SurveyId::new("SV_1").unwrap(),
            file_format: FileFormat::Csv,
            progress_id: ProgressId::new("P1").unwrap(),
            file_id: FileId::new("F1").unwrap(),
            phase: ExportPhase::Extracted,
            bytes_downloaded: 10,
            destination: PathBuf::from("MyQualtricsDownload"),
            extracted_files: vec![PathBuf::from("MyQualtricsDownload/Survey.csv")],
            duration: Duration::from_millis(1500),
        };
        assert!(summary.is_successful());

        summary.phase = ExportPhase::Fetched;
        assert!(!summary.is_successful());
    }
}

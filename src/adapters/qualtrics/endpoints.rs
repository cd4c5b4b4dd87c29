//! Qualtrics v3 endpoint paths, relative to the API base URL

use crate::domain::ids::{FileId, ProgressId, SurveyId};

/// Page size used by the survey listing endpoint
pub const PAGE_SIZE: usize = 100;

/// Survey listing
pub const SURVEYS: &str = "surveys";

/// Directory listing
pub const DIRECTORIES: &str = "directories";

/// Export initiation; progress and file paths hang off this prefix
pub fn export_responses(survey_id: &SurveyId) -> String {
    format!("surveys/{survey_id}/export-responses/")
}

pub fn export_progress(survey_id: &SurveyId, progress_id: &ProgressId) -> String {
    format!("{}{progress_id}", export_responses(survey_id))
}

pub fn export_file(survey_id: &SurveyId, file_id: &FileId) -> String {
    format!("{}{file_id}/file", export_responses(survey_id))
}

pub fn filters(survey_id: &SurveyId) -> String {
    format!("surveys/{survey_id}/filters")
}

/// Single survey (GET, PUT, DELETE)
pub fn survey(survey_id: &SurveyId) -> String {
    format!("surveys/{survey_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_paths() {
        let survey_id = SurveyId::new("SV_1").unwrap();
        let progress_id = ProgressId::new("P1").unwrap();
        let file_id = FileId::new("F1").unwrap();

        assert_eq!(export_responses(&survey_id), "surveys/SV_1/export-responses/");
        assert_eq!(
            export_progress(&survey_id, &progress_id),
            "surveys/SV_1/export-responses/P1"
        );
        assert_eq!(
            export_file(&survey_id, &file_id),
            "surveys/SV_1/export-responses/F1/file"
        );
    }

    #[test]
    fn test_survey_paths() {
        let survey_id = SurveyId::new("SV_1").unwrap();
        assert_eq!(survey(&survey_id), "surveys/SV_1");
        assert_eq!(filters(&survey_id), "surveys/SV_1/filters");
    }
}

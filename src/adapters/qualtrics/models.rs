//! Qualtrics API wire models
//!
//! Every v3 response wraps its payload as `{"result": ..., "meta": ...}`;
//! error responses carry `meta.error.errorMessage`.

use crate::domain::export::ExportStatus;
use crate::domain::ids::{FileId, ProgressId};
use serde::{Deserialize, Serialize};

/// Success envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub result: T,

    #[serde(default)]
    pub meta: Option<ResponseMeta>,
}

/// Error envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub meta: ResponseMeta,
}

impl ErrorEnvelope {
    /// Server-provided error message, if any
    pub fn error_message(&self) -> Option<&str> {
        self.meta
            .error
            .as_ref()
            .map(|error| error.error_message.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    #[serde(default)]
    pub request_id: Option<String>,

    #[serde(default)]
    pub http_status: Option<String>,

    #[serde(default)]
    pub error: Option<ErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub error_message: String,

    #[serde(default)]
    pub error_code: Option<String>,
}

/// Paginated list payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<T> {
    #[serde(default = "Vec::new")]
    pub elements: Vec<T>,

    #[serde(default)]
    pub next_page: Option<String>,
}

/// Payload of the export-initiation response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartExportResult {
    pub progress_id: ProgressId,
}

/// Payload of the export-progress response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportProgressResult {
    #[serde(default)]
    pub percent_complete: f64,

    pub status: ExportStatus,

    #[serde(default)]
    pub file_id: Option<FileId>,
}

/// Body of `PUT surveys/{id}` when toggling activation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyActivation {
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_envelope_message() {
        let envelope: ErrorEnvelope = serde_json::from_value(json!({
            "meta": {
                "httpStatus": "404 - Not Found",
                "error": {"errorMessage": "Survey not found", "errorCode": "QVAL_1"}
            }
        }))
        .unwrap();
        assert_eq!(envelope.error_message(), Some("Survey not found"));
    }

    #[test]
    fn test_progress_result_without_file_id() {
        let envelope: ApiEnvelope<ExportProgressResult> = serde_json::from_value(json!({
            "result": {"percentComplete": 50.0, "status": "inProgress"},
            "meta": {"requestId": "r1", "httpStatus": "200 - OK"}
        }))
        .unwrap();
        assert_eq!(envelope.result.status, ExportStatus::InProgress);
        assert!(envelope.result.file_id.is_none());
    }

    #[test]
    fn test_list_result_null_next_page() {
        let list: ListResult<serde_json::Value> =
            serde_json::from_value(json!({"elements": [], "nextPage": null})).unwrap();
        assert!(list.next_page.is_none());
    }

    #[test]
    fn test_activation_body() {
        let body = serde_json::to_value(SurveyActivation { is_active: false }).unwrap();
        assert_eq!(body, json!({"isActive": false}));
    }
}

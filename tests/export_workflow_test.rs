//! End-to-end export workflow tests against a mock Qualtrics server

use mockito::{Matcher, Server, ServerGuard};
use qualtrics_client::adapters::qualtrics::{QualtricsClient, ResponseExportApi};
use qualtrics_client::config::{secret_string, ExportConfig, QualtricsConfig};
use qualtrics_client::core::export::ExportWorkflow;
use qualtrics_client::domain::{
    ApiError, ExportJob, ExportPhase, FileFormat, QualtricsError, SurveyId,
};
use serde_json::json;
use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;
use zip::write::FileOptions;
use zip::ZipWriter;

const TOKEN: &str = "TEST_TOKEN";

fn client_for(server: &ServerGuard) -> QualtricsClient {
    let mut config = QualtricsConfig::new("fra1", Some(secret_string(TOKEN.to_string())));
    config.base_url = Some(server.url());
    QualtricsClient::new(config).unwrap()
}

fn export_config(destination: &TempDir) -> ExportConfig {
    let mut config = ExportConfig::default();
    config.destination_dir = destination.path().to_string_lossy().to_string();
    config.poll.interval_ms = 10;
    config.poll.max_interval_ms = 20;
    config.poll.timeout_seconds = 30;
    config
}

fn survey_zip() -> Vec<u8> {
    let mut buffer = Vec::new();
    {
        let mut writer = ZipWriter::new(Cursor::new(&mut buffer));
        writer
            .start_file("Customer Survey.csv", FileOptions::default())
            .unwrap();
        writer.write_all(b"ResponseId,Q1\nR_1,5\n").unwrap();
        writer.finish().unwrap();
    }
    buffer
}

fn progress_body(percent: f64, status: &str, file_id: Option<&str>) -> String {
    let mut result = json!({"percentComplete": percent, "status": status});
    if let Some(file_id) = file_id {
        result["fileId"] = json!(file_id);
    }
    json!({"result": result, "meta": {"httpStatus": "200 - OK", "requestId": "req-1"}})
        .to_string()
}

#[tokio::test]
async fn test_export_survey_end_to_end() {
    let mut server = Server::new_async().await;
    let destination = TempDir::new().unwrap();

    let submit = server
        .mock("POST", "/surveys/SV_1/export-responses/")
        .match_header("x-api-token", TOKEN)
        .match_body(Matcher::Json(json!({"format": "csv"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"result": {"progressId": "P1"}}).to_string())
        .expect(1)
        .create_async()
        .await;
    let in_progress = server
        .mock("GET", "/surveys/SV_1/export-responses/P1")
        .match_header("x-api-token", TOKEN)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(progress_body(50.0, "inProgress", None))
        .expect(1)
        .create_async()
        .await;
    let complete = server
        .mock("GET", "/surveys/SV_1/export-responses/P1")
        .match_header("x-api-token", TOKEN)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(progress_body(100.0, "complete", Some("F1")))
        .expect(1)
        .create_async()
        .await;
    let file = server
        .mock("GET", "/surveys/SV_1/export-responses/F1/file")
        .match_header("x-api-token", TOKEN)
        .with_status(200)
        .with_header("content-type", "application/octet-stream")
        .with_body(survey_zip())
        .expect(1)
        .create_async()
        .await;

    let workflow = ExportWorkflow::from_client(client_for(&server), &export_config(&destination));
    let summary = workflow.export_survey("SV_1", "csv", None).await.unwrap();

    submit.assert_async().await;
    in_progress.assert_async().await;
    complete.assert_async().await;
    file.assert_async().await;

    assert_eq!(summary.phase, ExportPhase::Extracted);
    assert_eq!(summary.progress_id.as_str(), "P1");
    assert_eq!(summary.file_id.as_str(), "F1");
    assert_eq!(summary.extracted_files.len(), 1);
    assert_eq!(
        std::fs::read_to_string(destination.path().join("Customer Survey.csv")).unwrap(),
        "ResponseId,Q1\nR_1,5\n"
    );
}

#[tokio::test]
async fn test_failed_export_is_not_fetched() {
    let mut server = Server::new_async().await;
    let destination = TempDir::new().unwrap();

    server
        .mock("POST", "/surveys/SV_1/export-responses/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"result": {"progressId": "P1"}}).to_string())
        .create_async()
        .await;
    let poll = server
        .mock("GET", "/surveys/SV_1/export-responses/P1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(progress_body(0.0, "failed", None))
        .expect(1)
        .create_async()
        .await;
    let file = server
        .mock("GET", Matcher::Regex(r"/file$".to_string()))
        .expect(0)
        .create_async()
        .await;

    let workflow = ExportWorkflow::from_client(client_for(&server), &export_config(&destination));
    let err = workflow.export_survey("SV_1", "csv", None).await.unwrap_err();

    assert!(matches!(
        err,
        QualtricsError::ExportFailure { ref progress_id, ref status }
            if progress_id == "P1" && status == "failed"
    ));
    poll.assert_async().await;
    file.assert_async().await;
    assert!(std::fs::read_dir(destination.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_unsupported_format_sends_no_request() {
    let mut server = Server::new_async().await;
    let destination = TempDir::new().unwrap();

    let any = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let workflow = ExportWorkflow::from_client(client_for(&server), &export_config(&destination));
    let err = workflow.export_survey("SV_1", "pdf", None).await.unwrap_err();

    assert!(matches!(err, QualtricsError::UnsupportedFormat(ref f) if f == "pdf"));
    any.assert_async().await;
}

#[tokio::test]
async fn test_submit_body_with_filter_and_extra_fields() {
    let mut server = Server::new_async().await;

    let submit = server
        .mock("POST", "/surveys/SV_1/export-responses/")
        .match_body(Matcher::Json(json!({
            "format": "ndjson",
            "filterId": "filter-1",
            "useLabels": true
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"result": {"progressId": "P9"}}).to_string())
        .expect(1)
        .create_async()
        .await;

    let job = ExportJob::new(SurveyId::new("SV_1").unwrap(), FileFormat::Ndjson)
        .with_filter_id("filter-1".parse().unwrap())
        .with_extra_field("useLabels", json!(true))
        .with_extra_field("format", json!("xml"));

    let progress_id = client_for(&server)
        .start_response_export(&job)
        .await
        .unwrap();

    assert_eq!(progress_id.as_str(), "P9");
    submit.assert_async().await;
}

#[tokio::test]
async fn test_http_error_surfaces_error_message() {
    let mut server = Server::new_async().await;
    let destination = TempDir::new().unwrap();

    server
        .mock("POST", "/surveys/SV_404/export-responses/")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "meta": {
                    "httpStatus": "404 - Not Found",
                    "error": {"errorMessage": "Survey not found", "errorCode": "QVAL_2"}
                }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let workflow = ExportWorkflow::from_client(client_for(&server), &export_config(&destination));
    let err = workflow.export_survey("SV_404", "csv", None).await.unwrap_err();

    match err {
        QualtricsError::Api(ApiError::Status { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Survey not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_http_errors_are_not_retried() {
    let mut server = Server::new_async().await;

    let failing = server
        .mock("GET", "/surveys/SV_1/export-responses/P1")
        .with_status(500)
        .with_body("boom")
        .expect(1)
        .create_async()
        .await;

    let err = client_for(&server)
        .get_response_export_progress(&SurveyId::new("SV_1").unwrap(), &"P1".parse().unwrap())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        QualtricsError::Api(ApiError::Status { status: 500, ref message }) if message == "boom"
    ));
    failing.assert_async().await;
}

#[tokio::test]
async fn test_connection_failure_after_retries() {
    let mut config = QualtricsConfig::new("fra1", Some(secret_string(TOKEN.to_string())));
    config.base_url = Some("http://127.0.0.1:1".to_string());
    config.timeout_seconds = 2;
    config.retry.max_retries = 1;
    config.retry.initial_delay_ms = 1;
    let client = QualtricsClient::new(config).unwrap();

    let job = ExportJob::new(SurveyId::new("SV_1").unwrap(), FileFormat::Csv);
    let err = client.start_response_export(&job).await.unwrap_err();

    assert!(err.is_transport());
}

/// Accepts connections and never answers; returns the base URL and the
/// number of connections accepted so far
async fn silent_server() -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));

    let counter = accepted.clone();
    tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            open.push(socket);
        }
    });

    (format!("http://{addr}"), accepted)
}

fn slow_client(base_url: String) -> QualtricsClient {
    let mut config = QualtricsConfig::new("fra1", Some(secret_string(TOKEN.to_string())));
    config.base_url = Some(base_url);
    config.timeout_seconds = 1;
    config.retry.max_retries = 2;
    config.retry.initial_delay_ms = 1;
    QualtricsClient::new(config).unwrap()
}

#[tokio::test]
async fn test_export_start_not_resent_after_timeout() {
    let (base_url, accepted) = silent_server().await;
    let client = slow_client(base_url);

    let job = ExportJob::new(SurveyId::new("SV_1").unwrap(), FileFormat::Csv);
    let err = client.start_response_export(&job).await.unwrap_err();

    assert!(matches!(err, QualtricsError::Api(ApiError::Timeout(_))));
    assert_eq!(accepted.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_progress_poll_retried_after_timeout() {
    let (base_url, accepted) = silent_server().await;
    let client = slow_client(base_url);

    let err = client
        .get_response_export_progress(&SurveyId::new("SV_1").unwrap(), &"P1".parse().unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, QualtricsError::Api(ApiError::Timeout(_))));
    assert_eq!(accepted.load(Ordering::SeqCst), 3);
}

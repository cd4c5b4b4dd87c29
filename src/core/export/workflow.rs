//! Response export workflow
//!
//! Drives one export through submit, poll, fetch and extract:
//!
//! ```text
//! Idle -> Submitted -> Polling -> Completed -> Fetched -> Extracted
//!                         |
//!                         +-----> Failed
//! ```
//!
//! Every step is awaited before the next one starts; the workflow keeps no
//! shared mutable state, so independent exports can run on separate
//! workflows concurrently.

use super::summary::ExportSummary;
use crate::adapters::archive::{ArchiveExtractor, ZipExtractor};
use crate::adapters::qualtrics::{QualtricsClient, ResponseExportApi};
use crate::config::{ExportConfig, PollConfig};
use crate::domain::ids::{FileId, FilterId, ProgressId, SurveyId};
use crate::domain::{
    ApiError, ExportJob, ExportPhase, ExportProgress, ExportStatus, FileFormat, QualtricsError,
    Result,
};
use crate::{log_export_complete, log_export_start};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Orchestrates a response export against a [`ResponseExportApi`]
///
/// # Example
///
/// ```no_run
/// use qualtrics_client::adapters::qualtrics::QualtricsClient;
/// use qualtrics_client::config::load_config;
/// use qualtrics_client::core::export::ExportWorkflow;
///
/// # async fn example() -> qualtrics_client::domain::Result<()> {
/// let config = load_config("qualtrics.toml")?;
/// let client = QualtricsClient::new(config.qualtrics.clone())?;
/// let workflow = ExportWorkflow::from_client(client, &config.export);
///
/// let summary = workflow.export_survey("SV_0c9ZqP7gdG4SvrD", "csv", None).await?;
/// println!("{} files extracted", summary.extracted_files.len());
/// # Ok(())
/// # }
/// ```
pub struct ExportWorkflow {
    api: Arc<dyn ResponseExportApi>,
    extractor: Arc<dyn ArchiveExtractor>,
    poll: PollConfig,
    destination: PathBuf,
    shutdown_signal: Option<watch::Receiver<bool>>,
}

impl ExportWorkflow {
    pub fn new(
        api: Arc<dyn ResponseExportApi>,
        extractor: Arc<dyn ArchiveExtractor>,
        config: &ExportConfig,
    ) -> Self {
        Self {
            api,
            extractor,
            poll: config.poll.clone(),
            destination: PathBuf::from(&config.destination_dir),
            shutdown_signal: None,
        }
    }

    /// Workflow over a live client, extracting ZIP archives
    pub fn from_client(client: QualtricsClient, config: &ExportConfig) -> Self {
        Self::new(Arc::new(client), Arc::new(ZipExtractor::new()), config)
    }

    /// Stop polling once the receiver reads `true`
    pub fn with_shutdown_signal(mut self, shutdown_signal: watch::Receiver<bool>) -> Self {
        self.shutdown_signal = Some(shutdown_signal);
        self
    }

    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = destination.into();
        self
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Submit the job and return its progress handle
    pub async fn submit_export(&self, job: &ExportJob) -> Result<ProgressId> {
        let progress_id = self.api.start_response_export(job).await?;
        tracing::info!(
            survey_id = %job.survey_id,
            progress_id = %progress_id,
            "Export submitted"
        );
        Ok(progress_id)
    }

    /// Poll until the job completes, fails, times out or is cancelled
    ///
    /// # Errors
    ///
    /// - [`QualtricsError::ExportFailure`] when the status contains `failed`
    /// - [`QualtricsError::ExportTimeout`] when the poll deadline passes
    /// - [`QualtricsError::Cancelled`] when the shutdown signal is set
    /// - [`ApiError::InvalidResponse`] for a complete status without a file id
    pub async fn await_completion(
        &self,
        survey_id: &SurveyId,
        progress_id: &ProgressId,
    ) -> Result<ExportProgress> {
        let started = Instant::now();
        let deadline = self.poll.timeout();
        let mut interval = self.poll.initial_interval();
        let mut shutdown = self.shutdown_signal.clone();

        loop {
            if is_cancelled(&shutdown) {
                tracing::warn!(progress_id = %progress_id, "Export cancelled");
                return Err(QualtricsError::Cancelled(progress_id.to_string()));
            }

            let progress = self
                .api
                .get_response_export_progress(survey_id, progress_id)
                .await?;

            tracing::info!(
                progress_id = %progress_id,
                percent_complete = progress.percent_complete,
                status = %progress.status,
                "Export progress"
            );

            match &progress.status {
                ExportStatus::Complete => {
                    if progress.file_id.is_none() {
                        return Err(ApiError::InvalidResponse(format!(
                            "Export {progress_id} is complete but has no fileId"
                        ))
                        .into());
                    }
                    return Ok(progress);
                }
                ExportStatus::Failed(status) => {
                    return Err(QualtricsError::ExportFailure {
                        progress_id: progress_id.to_string(),
                        status: status.clone(),
                    });
                }
                ExportStatus::InProgress | ExportStatus::Other(_) => {}
            }

            let elapsed = started.elapsed();
            let mut delay = interval;
            if let Some(limit) = deadline {
                if elapsed >= limit {
                    return Err(QualtricsError::ExportTimeout {
                        progress_id: progress_id.to_string(),
                        elapsed_secs: elapsed.as_secs(),
                    });
                }
                delay = delay.min(limit - elapsed);
            }

            pause(delay, &mut shutdown).await;
            interval = self.poll.next_interval(interval);
        }
    }

    /// Download the finished archive
    pub async fn fetch_export_file(&self, survey_id: &SurveyId, file_id: &FileId) -> Result<Vec<u8>> {
        self.api.get_response_export_file(survey_id, file_id).await
    }

    /// Submit, await, fetch and extract one export job
    pub async fn run(&self, job: &ExportJob) -> Result<ExportSummary> {
        let started = Instant::now();
        let survey_id = &job.survey_id;
        log_export_start!(survey_id, job.file_format);

        let mut phase = ExportPhase::Idle;
        let progress_id = self.submit_export(job).await?;
        transition(&mut phase, ExportPhase::Submitted, survey_id);

        transition(&mut phase, ExportPhase::Polling, survey_id);
        let progress = match self.await_completion(survey_id, &progress_id).await {
            Ok(progress) => progress,
            Err(e) => {
                if matches!(e, QualtricsError::ExportFailure { .. }) {
                    transition(&mut phase, ExportPhase::Failed, survey_id);
                }
                return Err(e);
            }
        };
        transition(&mut phase, ExportPhase::Completed, survey_id);

        let file_id = progress.file_id.ok_or_else(|| {
            ApiError::InvalidResponse(format!("Export {progress_id} has no fileId"))
        })?;

        let archive = self.fetch_export_file(survey_id, &file_id).await?;
        let bytes_downloaded = archive.len();
        transition(&mut phase, ExportPhase::Fetched, survey_id);

        let extracted_files = self.extractor.extract(archive, &self.destination).await?;
        transition(&mut phase, ExportPhase::Extracted, survey_id);

        let duration = started.elapsed();
        log_export_complete!(extracted_files.len(), duration);

        Ok(ExportSummary {
            survey_id: survey_id.clone(),
            file_format: job.file_format,
            progress_id,
            file_id,
            phase,
            bytes_downloaded,
            destination: self.destination.clone(),
            extracted_files,
            duration,
        })
    }

    /// Export a survey from raw identifiers
    ///
    /// The format is checked first, so an unsupported format never reaches
    /// the network.
    pub async fn export_survey(
        &self,
        survey_id: &str,
        file_format: &str,
        filter_id: Option<&str>,
    ) -> Result<ExportSummary> {
        let file_format: FileFormat = file_format.parse()?;
        let survey_id = SurveyId::new(survey_id).map_err(QualtricsError::Validation)?;

        let mut job = ExportJob::new(survey_id, file_format);
        if let Some(filter_id) = filter_id {
            job = job.with_filter_id(FilterId::new(filter_id).map_err(QualtricsError::Validation)?);
        }

        self.run(&job).await
    }
}

fn transition(phase: &mut ExportPhase, next: ExportPhase, survey_id: &SurveyId) {
    let from = *phase;
    tracing::debug!(survey_id = %survey_id, from = %from, to = %next, "Export phase");
    *phase = next;
}

fn is_cancelled(shutdown: &Option<watch::Receiver<bool>>) -> bool {
    shutdown.as_ref().map(|rx| *rx.borrow()).unwrap_or(false)
}

/// Sleep for `delay`, waking early when the shutdown signal changes
async fn pause(delay: Duration, shutdown: &mut Option<watch::Receiver<bool>>) {
    match shutdown {
        Some(rx) => {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                Ok(()) = rx.changed() => {}
            }
        }
        None => tokio::time::sleep(delay).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Replays progress snapshots in order, then repeats the last one
    struct ScriptedApi {
        snapshots: Mutex<VecDeque<(f64, &'static str, Option<&'static str>)>>,
        last: Mutex<Option<(f64, &'static str, Option<&'static str>)>>,
        polls: AtomicUsize,
        fetches: AtomicUsize,
    }

    impl ScriptedApi {
        fn new(snapshots: Vec<(f64, &'static str, Option<&'static str>)>) -> Arc<Self> {
            Arc::new(Self {
                snapshots: Mutex::new(snapshots.into()),
                last: Mutex::new(None),
                polls: AtomicUsize::new(0),
                fetches: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ResponseExportApi for ScriptedApi {
        async fn start_response_export(&self, _job: &ExportJob) -> Result<ProgressId> {
            Ok(ProgressId::new("P1").unwrap())
        }

        async fn get_response_export_progress(
            &self,
            _survey_id: &SurveyId,
            progress_id: &ProgressId,
        ) -> Result<ExportProgress> {
            self.polls.fetch_add(1, Ordering::SeqCst);
            let next = self.snapshots.lock().unwrap().pop_front();
            let snapshot = match next {
                Some(snapshot) => {
                    *self.last.lock().unwrap() = Some(snapshot);
                    snapshot
                }
                None => self.last.lock().unwrap().unwrap(),
            };
            let (percent_complete, status, file_id) = snapshot;
            Ok(ExportProgress {
                progress_id: progress_id.clone(),
                percent_complete,
                status: ExportStatus::from(status),
                file_id: file_id.map(|id| FileId::new(id).unwrap()),
            })
        }

        async fn get_response_export_file(
            &self,
            _survey_id: &SurveyId,
            _file_id: &FileId,
        ) -> Result<Vec<u8>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(b"archive".to_vec())
        }
    }

    #[derive(Default)]
    struct RecordingExtractor {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ArchiveExtractor for RecordingExtractor {
        async fn extract(&self, archive: Vec<u8>, destination: &Path) -> Result<Vec<PathBuf>> {
            assert_eq!(archive, b"archive");
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![destination.join("Survey.csv")])
        }
    }

    fn fast_config() -> ExportConfig {
        let mut config = ExportConfig::default();
        config.poll.interval_ms = 5;
        config.poll.max_interval_ms = 20;
        config
    }

    fn workflow(
        api: &Arc<ScriptedApi>,
        extractor: &Arc<RecordingExtractor>,
        config: &ExportConfig,
    ) -> ExportWorkflow {
        ExportWorkflow::new(api.clone(), extractor.clone(), config)
    }

    fn job() -> ExportJob {
        ExportJob::new(SurveyId::new("SV_1").unwrap(), FileFormat::Csv)
    }

    #[tokio::test]
    async fn test_run_completes_after_in_progress() {
        let api = ScriptedApi::new(vec![
            (50.0, "inProgress", None),
            (100.0, "complete", Some("F1")),
        ]);
        let extractor = Arc::new(RecordingExtractor::default());
        let workflow = workflow(&api, &extractor, &fast_config()).with_destination("out");

        let summary = workflow.run(&job()).await.unwrap();

        assert_eq!(summary.phase, ExportPhase::Extracted);
        assert_eq!(summary.progress_id.as_str(), "P1");
        assert_eq!(summary.file_id.as_str(), "F1");
        assert_eq!(summary.bytes_downloaded, 7);
        assert_eq!(summary.extracted_files, vec![PathBuf::from("out/Survey.csv")]);
        assert_eq!(api.polls.load(Ordering::SeqCst), 2);
        assert_eq!(api.fetches.load(Ordering::SeqCst), 1);
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_status_keeps_polling() {
        let api = ScriptedApi::new(vec![
            (0.0, "queued", None),
            (100.0, "complete", Some("F1")),
        ]);
        let extractor = Arc::new(RecordingExtractor::default());
        let workflow = workflow(&api, &extractor, &fast_config());

        let survey_id = SurveyId::new("SV_1").unwrap();
        let progress_id = ProgressId::new("P1").unwrap();
        let progress = workflow
            .await_completion(&survey_id, &progress_id)
            .await
            .unwrap();

        assert_eq!(progress.status, ExportStatus::Complete);
        assert_eq!(progress.progress_id, progress_id);
        assert_eq!(api.polls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_status_stops_without_fetch() {
        for status in ["failed", "export_failed"] {
            let api = ScriptedApi::new(vec![(0.0, status, None)]);
            let extractor = Arc::new(RecordingExtractor::default());
            let workflow = workflow(&api, &extractor, &fast_config());

            let err = workflow.run(&job()).await.unwrap_err();

            match err {
                QualtricsError::ExportFailure {
                    progress_id,
                    status: reported,
                } => {
                    assert_eq!(progress_id, "P1");
                    assert_eq!(reported, status);
                }
                other => panic!("unexpected error: {other}"),
            }
            assert_eq!(api.polls.load(Ordering::SeqCst), 1);
            assert_eq!(api.fetches.load(Ordering::SeqCst), 0);
            assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_complete_without_file_id_is_invalid() {
        let api = ScriptedApi::new(vec![(100.0, "complete", None)]);
        let extractor = Arc::new(RecordingExtractor::default());
        let workflow = workflow(&api, &extractor, &fast_config());

        let err = workflow.run(&job()).await.unwrap_err();

        assert!(matches!(
            err,
            QualtricsError::Api(ApiError::InvalidResponse(_))
        ));
        assert_eq!(api.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_poll_deadline_exceeded() {
        let api = ScriptedApi::new(vec![(10.0, "inProgress", None)]);
        let extractor = Arc::new(RecordingExtractor::default());
        let mut config = fast_config();
        config.poll.interval_ms = 50;
        config.poll.max_interval_ms = 50;
        config.poll.timeout_seconds = 1;
        let workflow = workflow(&api, &extractor, &config);

        let err = workflow.run(&job()).await.unwrap_err();

        assert!(matches!(err, QualtricsError::ExportTimeout { .. }));
        assert!(api.polls.load(Ordering::SeqCst) > 1);
        assert_eq!(api.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancelled_before_first_poll() {
        let api = ScriptedApi::new(vec![(10.0, "inProgress", None)]);
        let extractor = Arc::new(RecordingExtractor::default());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let workflow =
            workflow(&api, &extractor, &fast_config()).with_shutdown_signal(shutdown_rx);

        shutdown_tx.send(true).unwrap();
        let err = workflow.run(&job()).await.unwrap_err();

        assert!(matches!(err, QualtricsError::Cancelled(ref id) if id == "P1"));
        assert_eq!(api.polls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancel_interrupts_poll_delay() {
        let api = ScriptedApi::new(vec![(10.0, "inProgress", None)]);
        let extractor = Arc::new(RecordingExtractor::default());
        let mut config = fast_config();
        config.poll.interval_ms = 60_000;
        config.poll.max_interval_ms = 60_000;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let workflow = workflow(&api, &extractor, &config).with_shutdown_signal(shutdown_rx);

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let _ = shutdown_tx.send(true);
        });

        let started = Instant::now();
        let err = workflow.run(&job()).await.unwrap_err();

        assert!(matches!(err, QualtricsError::Cancelled(_)));
        assert!(started.elapsed() < Duration::from_secs(10));
        assert_eq!(api.polls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dropped_sender_does_not_cancel() {
        let api = ScriptedApi::new(vec![
            (10.0, "inProgress", None),
            (100.0, "complete", Some("F1")),
        ]);
        let extractor = Arc::new(RecordingExtractor::default());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        drop(shutdown_tx);
        let workflow =
            workflow(&api, &extractor, &fast_config()).with_shutdown_signal(shutdown_rx);

        let summary = workflow.run(&job()).await.unwrap();
        assert_eq!(summary.phase, ExportPhase::Extracted);
    }

    #[tokio::test]
    async fn test_export_survey_rejects_unsupported_format() {
        let api = ScriptedApi::new(vec![]);
        let extractor = Arc::new(RecordingExtractor::default());
        let workflow = workflow(&api, &extractor, &fast_config());

        let err = workflow.export_survey("SV_1", "pdf", None).await.unwrap_err();

        assert!(matches!(err, QualtricsError::UnsupportedFormat(ref f) if f == "pdf"));
        assert_eq!(api.polls.load(Ordering::SeqCst), 0);
    }
}

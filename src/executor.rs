use crate::{
    config::Config,
    fetch::{FetchOutcome, Fetcher},
    host::{request_elevated, ElevatedExecutionRequest, ExecutionHost},
    policy::{self, Verdict},
    report::AttemptReport,
    result::JobResult,
    sink,
    util::{file_uri, now_rfc3339},
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// One download attempt. Holds no state that outlives [`DownloadJob::execute`],
/// so a retry is simply another call on a fresh or the same job.
pub struct DownloadJob<F: Fetcher, H: ExecutionHost> {
    cfg: Config,
    fetcher: F,
    host: H,
    sink_path: PathBuf,
}

struct Attempt {
    elevated: bool,
    result: JobResult,
}

impl<F: Fetcher, H: ExecutionHost> DownloadJob<F, H> {
    pub fn new(cfg: &Config, fetcher: F, host: H, sink_path: impl Into<PathBuf>) -> Self {
        Self {
            cfg: cfg.clone(),
            fetcher,
            host,
            sink_path: sink_path.into(),
        }
    }

    pub fn sink_path(&self) -> &Path {
        &self.sink_path
    }

    pub async fn execute(&self) -> JobResult {
        self.attempt().await.result
    }

    /// Runs [`DownloadJob::execute`] and wraps the result with attempt metadata.
    pub async fn run(&self, job_id: &str) -> AttemptReport {
        let started = now_rfc3339();
        let attempt = self.attempt().await;
        AttemptReport {
            job_id: job_id.to_string(),
            endpoint: self.cfg.job.endpoint.clone(),
            sink_path: self.sink_path.display().to_string(),
            started,
            finished: now_rfc3339(),
            elevated: attempt.elevated,
            output_data: attempt.result.output_data(),
            result: attempt.result,
        }
    }

    async fn attempt(&self) -> Attempt {
        let request = ElevatedExecutionRequest::from_config(&self.cfg);
        let elevated = request_elevated(&self.host, &request).await;
        debug!("elevated={elevated} id={}", request.id);

        if self.cfg.job.min_work_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.cfg.job.min_work_delay_ms)).await;
        }

        let outcome = self.fetcher.fetch().await;
        info!("fetch outcome={}", outcome.kind());
        if let FetchOutcome::HttpError { status } = &outcome {
            info!("http status={status} without body");
        }

        let result = match policy::decide(&self.cfg, &outcome) {
            Verdict::Persist(bytes) => self.persist(bytes).await,
            Verdict::Retry => JobResult::Retry,
            Verdict::Fail(reason) => JobResult::failure(reason),
        };

        match &result {
            JobResult::Success { resource_location } => info!("success uri={resource_location}"),
            JobResult::Retry => info!("retry requested"),
            JobResult::Failure { reason } => warn!("failure reason={reason}"),
        }

        Attempt { elevated, result }
    }

    async fn persist(&self, bytes: &[u8]) -> JobResult {
        debug!("writing {} bytes to {}", bytes.len(), self.sink_path.display());
        if let Err(e) = sink::write_image(&self.sink_path, bytes).await {
            return JobResult::failure(e.to_string());
        }

        let resolved = tokio::fs::canonicalize(&self.sink_path)
            .await
            .unwrap_or_else(|_| self.sink_path.clone());
        JobResult::success(file_uri(&resolved))
    }
}

//! One worker: probe its partition sequentially with a fixed pause between URLs.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::fetch_head::LengthFetcher;
use crate::partition::Partition;
use crate::retry::run_with_retry;

use super::output::{ProbeOutcome, ResultLine};
use super::{ErrorPolicy, ProbeSettings};

/// What a single worker did with its partition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerReport {
    pub worker: usize,
    /// Result lines sent to the printer (sentinel lines included).
    pub emitted: usize,
    /// URLs whose probe failed.
    pub failed: usize,
    /// URLs never probed because the worker aborted.
    pub dropped: usize,
    pub aborted: bool,
}

pub(crate) async fn run_worker(
    worker: usize,
    urls: Partition,
    fetcher: Arc<dyn LengthFetcher>,
    settings: ProbeSettings,
    tx: mpsc::Sender<ResultLine>,
) -> Result<WorkerReport> {
    let mut report = WorkerReport {
        worker,
        ..WorkerReport::default()
    };
    let total = urls.len();
    tracing::debug!(urls = total, "worker started");

    for (idx, url) in urls.into_iter().enumerate() {
        let result = {
            let fetcher = Arc::clone(&fetcher);
            let retry = settings.retry;
            let url = url.clone();
            tokio::task::spawn_blocking(move || run_with_retry(&retry, || fetcher.fetch_length(&url)))
                .await
                .context("probe task join")?
        };

        let outcome = match result {
            Ok(len) => {
                tracing::debug!(url = %url, len, "probed");
                Some(ProbeOutcome::Length(len))
            }
            Err(e) => {
                report.failed += 1;
                match settings.on_error {
                    ErrorPolicy::AbortWorker => {
                        report.aborted = true;
                        report.dropped = total - idx - 1;
                        tracing::error!(url = %url, error = %e, dropped = report.dropped, "probe failed; worker aborting");
                        break;
                    }
                    ErrorPolicy::Skip => {
                        tracing::warn!(url = %url, error = %e, "probe failed; skipping");
                        None
                    }
                    ErrorPolicy::Sentinel => {
                        tracing::warn!(url = %url, error = %e, "probe failed; emitting sentinel");
                        Some(ProbeOutcome::Failed)
                    }
                }
            }
        };

        if let Some(outcome) = outcome {
            tx.send(ResultLine { url, outcome })
                .await
                .map_err(|_| anyhow::anyhow!("result channel closed"))?;
            report.emitted += 1;
        }

        if idx + 1 < total && !settings.delay.is_zero() {
            tokio::time::sleep(settings.delay).await;
        }
    }

    tracing::debug!(
        emitted = report.emitted,
        failed = report.failed,
        aborted = report.aborted,
        "worker done"
    );
    Ok(report)
}

//! Concurrent content-length prober.
//!
//! The URL set is partitioned once, up front; each partition is moved into
//! its own worker task. Workers send result lines over a bounded channel to
//! a single printer task that owns the output sink. All tasks are joined
//! before [`process`] returns, so output is complete and flushed on return.

mod output;
mod worker;

pub use output::{spawn_printer, ProbeOutcome, ResultLine};
pub use worker::WorkerReport;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::Instrument;

use crate::fetch_head::LengthFetcher;
use crate::input::UrlSet;
use crate::partition::{self, PartitionStrategy};
use crate::retry::RetryPolicy;

/// Bound on result lines buffered between workers and the printer.
const RESULT_CHANNEL_CAPACITY: usize = 64;

/// What a transport error does to the worker that hit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Stop the worker; its remaining URLs are dropped. Other workers continue.
    #[default]
    AbortWorker,
    /// Log and move on to the next URL without emitting a line.
    Skip,
    /// Emit `"<url> -1"` and move on.
    Sentinel,
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort-worker" => Ok(ErrorPolicy::AbortWorker),
            "skip" => Ok(ErrorPolicy::Skip),
            "sentinel" => Ok(ErrorPolicy::Sentinel),
            other => Err(format!(
                "unknown error policy '{}' (expected abort-worker, skip or sentinel)",
                other
            )),
        }
    }
}

/// Run parameters, fixed for the whole invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeSettings {
    /// Number of concurrently executing workers.
    pub workers: usize,
    /// Pause between consecutive URLs of one worker.
    pub delay: Duration,
    pub partition: PartitionStrategy,
    pub on_error: ErrorPolicy,
    pub retry: RetryPolicy,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            workers: 32,
            delay: Duration::from_millis(500),
            partition: PartitionStrategy::default(),
            on_error: ErrorPolicy::default(),
            retry: RetryPolicy::no_retry(),
        }
    }
}

/// Totals over all workers of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeSummary {
    pub workers: usize,
    pub urls: usize,
    pub emitted: usize,
    pub failed: usize,
    pub dropped: usize,
    pub aborted_workers: usize,
}

impl ProbeSummary {
    fn absorb(&mut self, report: &WorkerReport) {
        self.emitted += report.emitted;
        self.failed += report.failed;
        self.dropped += report.dropped;
        if report.aborted {
            self.aborted_workers += 1;
        }
    }
}

/// Probes every URL in `urls` and writes one result line per probed URL to `sink`.
///
/// Lines from different workers interleave in completion order; within one
/// worker they follow partition order. A worker aborted by a transport error
/// does not fail the run; a panicked worker or a failing sink does.
/// Returns the run summary and the sink.
pub async fn process<W>(
    urls: UrlSet,
    settings: &ProbeSettings,
    fetcher: Arc<dyn LengthFetcher>,
    sink: W,
) -> Result<(ProbeSummary, W)>
where
    W: Write + Send + 'static,
{
    let url_count = urls.len();
    let partitions = partition::partition(urls, settings.workers, settings.partition);
    let mut summary = ProbeSummary {
        workers: partitions.len(),
        urls: url_count,
        ..ProbeSummary::default()
    };
    tracing::info!(
        urls = url_count,
        workers = partitions.len(),
        strategy = ?settings.partition,
        "starting probe run"
    );

    let (tx, rx) = mpsc::channel::<ResultLine>(RESULT_CHANNEL_CAPACITY);
    let printer = spawn_printer(rx, sink);

    let mut join_set = tokio::task::JoinSet::new();
    for (id, part) in partitions.into_iter().enumerate() {
        let span = tracing::info_span!("worker", worker = id);
        join_set.spawn(
            worker::run_worker(id, part, Arc::clone(&fetcher), *settings, tx.clone())
                .instrument(span),
        );
    }
    drop(tx);

    let mut worker_err = None;
    while let Some(res) = join_set.join_next().await {
        match res.map_err(|e| anyhow::anyhow!("worker task join: {}", e)) {
            Ok(Ok(report)) => summary.absorb(&report),
            Ok(Err(e)) | Err(e) => {
                tracing::error!("worker failed: {:#}", e);
                worker_err.get_or_insert(e);
            }
        }
    }

    // A sink failure closes the channel and surfaces in workers too; report the root cause.
    let sink = printer
        .await
        .context("printer task join")?
        .context("write result line")?;
    if let Some(e) = worker_err {
        return Err(e);
    }

    tracing::info!(
        emitted = summary.emitted,
        failed = summary.failed,
        dropped = summary.dropped,
        aborted_workers = summary.aborted_workers,
        "probe run finished"
    );
    Ok((summary, sink))
}

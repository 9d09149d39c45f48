//! `lenprobe probe` – read URLs from stdin and probe them concurrently.

use anyhow::{Context, Result};
use lenprobe_core::config::ProbeConfig;
use lenprobe_core::fetch_head::CurlFetcher;
use lenprobe_core::input;
use lenprobe_core::prober;
use std::io;
use std::sync::Arc;

pub async fn run_probe(cfg: &ProbeConfig) -> Result<()> {
    // Validate all input before the first request goes out.
    let urls = tokio::task::spawn_blocking(|| input::read_urls(io::stdin().lock()))
        .await
        .context("stdin reader join")??;

    let fetcher = Arc::new(CurlFetcher::new(cfg.fetch_options()));
    let (summary, _stdout) =
        prober::process(urls, &cfg.probe_settings(), fetcher, io::stdout()).await?;

    if summary.aborted_workers > 0 {
        tracing::warn!(
            aborted_workers = summary.aborted_workers,
            dropped = summary.dropped,
            "some workers stopped early after transport errors"
        );
    }
    Ok(())
}

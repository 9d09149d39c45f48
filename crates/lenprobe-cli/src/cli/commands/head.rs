//! `lenprobe head <url>` – probe one URL.

use anyhow::{Context, Result};
use lenprobe_core::config::ProbeConfig;
use lenprobe_core::fetch_head;
use lenprobe_core::prober::{ProbeOutcome, ResultLine};

pub async fn run_head(cfg: &ProbeConfig, url: &str) -> Result<()> {
    let opts = cfg.fetch_options();
    let len = tokio::task::spawn_blocking({
        let url = url.to_string();
        move || fetch_head::probe_head(&url, &opts)
    })
    .await
    .context("probe task join")?
    .with_context(|| format!("HEAD {}", url))?;

    println!(
        "{}",
        ResultLine {
            url: url.to_string(),
            outcome: ProbeOutcome::Length(len),
        }
    );
    Ok(())
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch_head::FetchOptions;
use crate::partition::PartitionStrategy;
use crate::prober::{ErrorPolicy, ProbeSettings};
use crate::retry::RetryPolicy;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts per URL (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay: Duration::try_from_secs_f64(self.base_delay_secs).unwrap_or(Duration::ZERO),
            max_delay: Duration::from_secs(self.max_delay_secs),
        }
    }
}

/// Global configuration loaded from `~/.config/lenprobe/config.toml`.
///
/// Keys missing from the file take their value from `ProbeConfig::default()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Number of concurrently executing probe workers.
    pub workers: usize,
    /// Pause between two consecutive URLs of the same worker, in milliseconds.
    pub delay_ms: u64,
    /// Connect timeout per HEAD request, in seconds.
    pub connect_timeout_secs: u64,
    /// Total timeout per HEAD request, in seconds.
    pub timeout_secs: u64,
    /// Follow 3xx redirects and report the final response's length.
    pub follow_redirects: bool,
    /// How URLs are split across workers: "balanced" (default) or "chunked".
    pub partition: PartitionStrategy,
    /// What a transport error does to a worker: "abort-worker" (default), "skip" or "sentinel".
    pub on_error: ErrorPolicy,
    /// Optional retry policy; if missing, each URL is tried exactly once.
    pub retry: Option<RetryConfig>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            workers: 32,
            delay_ms: 500,
            connect_timeout_secs: 15,
            timeout_secs: 30,
            follow_redirects: true,
            partition: PartitionStrategy::default(),
            on_error: ErrorPolicy::default(),
            retry: None,
        }
    }
}

impl ProbeConfig {
    /// Rejects values that would stall or never start a run.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            anyhow::bail!("workers must be at least 1");
        }
        if self.timeout_secs == 0 || self.connect_timeout_secs == 0 {
            anyhow::bail!("timeouts must be at least 1 second");
        }
        Ok(())
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
            follow_redirects: self.follow_redirects,
        }
    }

    /// Run settings for the prober derived from this config.
    pub fn probe_settings(&self) -> ProbeSettings {
        ProbeSettings {
            workers: self.workers,
            delay: Duration::from_millis(self.delay_ms),
            partition: self.partition,
            on_error: self.on_error,
            retry: self
                .retry
                .as_ref()
                .map(RetryConfig::to_policy)
                .unwrap_or_else(RetryPolicy::no_retry),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("lenprobe")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ProbeConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ProbeConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path (no default file is created).
pub fn load_from(path: &Path) -> Result<ProbeConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: ProbeConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

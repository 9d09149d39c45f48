//! CLI for lenprobe.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lenprobe_core::config::{self, ProbeConfig};
use lenprobe_core::partition::PartitionStrategy;
use lenprobe_core::prober::ErrorPolicy;
use std::path::{Path, PathBuf};

use commands::{run_config, run_head, run_probe};

/// Top-level CLI for lenprobe.
#[derive(Debug, Parser)]
#[command(name = "lenprobe")]
#[command(about = "lenprobe: concurrent HEAD probing of URL content lengths", long_about = None)]
pub struct Cli {
    /// Read config from PATH instead of ~/.config/lenprobe/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Read URLs from stdin (first token per line) and print "<url> <content-length>" for each.
    Probe {
        /// Number of concurrent probe workers.
        #[arg(long, short = 'w', value_name = "N")]
        workers: Option<usize>,
        /// Pause between consecutive URLs of one worker, in milliseconds.
        #[arg(long, value_name = "MS")]
        delay_ms: Option<u64>,
        /// Total timeout per HEAD request, in seconds.
        #[arg(long, value_name = "SECS")]
        timeout_secs: Option<u64>,
        /// Connect timeout per HEAD request, in seconds.
        #[arg(long, value_name = "SECS")]
        connect_timeout_secs: Option<u64>,
        /// How URLs are split across workers: balanced or chunked.
        #[arg(long, value_name = "STRATEGY")]
        partition: Option<PartitionStrategy>,
        /// On a transport error: abort-worker, skip or sentinel.
        #[arg(long, value_name = "POLICY")]
        on_error: Option<ErrorPolicy>,
        /// Report the redirect response itself instead of following it.
        #[arg(long)]
        no_follow_redirects: bool,
    },

    /// Probe a single URL and print its result line.
    Head {
        /// Direct HTTP/HTTPS URL.
        url: String,
        /// Total timeout for the request, in seconds.
        #[arg(long, value_name = "SECS")]
        timeout_secs: Option<u64>,
    },

    /// Show the config file path and the effective configuration.
    Config,
}

fn load_config(path: Option<&Path>) -> Result<ProbeConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

/// Layers command-line flags over the loaded config; unset flags keep the config value.
fn apply_overrides(cfg: &mut ProbeConfig, command: &CliCommand) {
    match command {
        CliCommand::Probe {
            workers,
            delay_ms,
            timeout_secs,
            connect_timeout_secs,
            partition,
            on_error,
            no_follow_redirects,
        } => {
            if let Some(n) = workers {
                cfg.workers = *n;
            }
            if let Some(ms) = delay_ms {
                cfg.delay_ms = *ms;
            }
            if let Some(s) = timeout_secs {
                cfg.timeout_secs = *s;
            }
            if let Some(s) = connect_timeout_secs {
                cfg.connect_timeout_secs = *s;
            }
            if let Some(p) = partition {
                cfg.partition = *p;
            }
            if let Some(p) = on_error {
                cfg.on_error = *p;
            }
            if *no_follow_redirects {
                cfg.follow_redirects = false;
            }
        }
        CliCommand::Head { timeout_secs, .. } => {
            if let Some(s) = timeout_secs {
                cfg.timeout_secs = *s;
            }
        }
        CliCommand::Config => {}
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        apply_overrides(&mut cfg, &cli.command);

        match cli.command {
            CliCommand::Probe { .. } => {
                cfg.validate()?;
                run_probe(&cfg).await?;
            }
            CliCommand::Head { url, .. } => {
                cfg.validate()?;
                run_head(&cfg, &url).await?;
            }
            CliCommand::Config => run_config(&cfg, cli.config.as_deref())?,
        }

        Ok(())
    }
}

//! Main CLI application structure

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::output::{Output, OutputFormat};
use crate::storage::{Config, Repository};

#[derive(Parser, Debug)]
#[command(name = "erc-finality")]
#[command(
    author,
    version,
    about = "Extract ERC metadata and finalization dates from a local ERCs repository"
)]
pub struct Cli {
    /// Path to the local ERCs repository
    #[arg(long, default_value = "ERCs", env = "ERC_FINALITY_REPO")]
    pub repo: PathBuf,

    /// Only include documents with this status [default: Final]
    #[arg(long, conflicts_with = "all_statuses")]
    pub status: Option<String>,

    /// Include documents regardless of status
    #[arg(long)]
    pub all_statuses: bool,

    /// Do not print the CSV header row
    #[arg(long)]
    pub no_header: bool,

    /// Output format
    #[arg(long, short = 'f', default_value = "csv")]
    pub format: OutputFormat,

    /// Settings file (defaults to <repo>/.erc-finality.toml, then the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Status filter to apply, if any
    fn status_filter(&self, config: &Config) -> Option<String> {
        if self.all_statuses {
            return None;
        }
        Some(
            self.status
                .clone()
                .unwrap_or_else(|| config.terminal_status.clone()),
        )
    }
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(&cli.repo, cli.config.as_deref())?;
    debug!(?config, "configuration loaded");

    let repo = match Repository::open(&cli.repo, config) {
        Ok(repo) => repo,
        Err(e) => Cli::command().error(ErrorKind::ValueValidation, e).exit(),
    };

    let status_filter = cli.status_filter(repo.config());
    info!(repo = %repo.root().display(), status = ?status_filter, "collecting documents");

    let stdout = io::stdout();
    let mut output = Output::new(stdout.lock(), cli.format);

    if !cli.no_header {
        output.header()?;
    }

    for record in repo.collect(status_filter)? {
        output.record(&record?)?;
    }

    debug!(rows = output.rows(), "done");
    Ok(())
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides `--verbose`
fn init_logging(verbose: bool) {
    let default = if verbose { "erc_finality=debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(io::stderr),
        )
        .init();
}

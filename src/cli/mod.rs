//! # Command-Line Interface
//!
//! A single command that prints one CSV row per ERC:
//!
//! ```bash
//! erc-finality --repo ../ERCs > finalized.csv
//! erc-finality --repo ../ERCs --all-statuses --format json
//! ```
//!
//! ## Options
//!
//! | Flag | Purpose | Default |
//! |------|---------|---------|
//! | `--repo` | Repository checkout | `ERCs` |
//! | `--status` | Current status to keep | `Final` |
//! | `--all-statuses` | Disable the status filter | off |
//! | `--no-header` | Omit the CSV header | off |
//! | `--format` | `csv` or `json` | `csv` |
//! | `--config` | Settings file | `<repo>/.erc-finality.toml` |
//!
//! ## Verbose Mode
//!
//! `--verbose` (or `-v`) logs every git query to stderr. `RUST_LOG`
//! takes precedence when set.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and print the table.

mod app;
mod output;

pub use app::{run, Cli};
pub use output::{Output, OutputFormat};

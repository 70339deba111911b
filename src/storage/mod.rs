//! # Storage Layer
//!
//! Everything that touches the filesystem or the `git` executable.
//!
//! ## Inputs
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Documents | Markdown + front matter | `<repo>/ERCS/*.md` |
//! | History | git log / git show | `<repo>/.git` |
//! | Config | TOML | `<repo>/.erc-finality.toml` or global |
//!
//! ## Key Types
//!
//! - [`Repository`] - Validated repository root, entry point for collection
//! - [`DocumentCollector`] - Lazy iterator of [`DocumentRecord`](crate::domain::DocumentRecord)s
//! - [`GitHistory`] - [`History`](crate::domain::History) backed by `git`
//! - `MemoryHistory` - Scripted in-memory history (test builds only)
//! - [`Config`] - Extraction settings

mod collector;
mod config;
mod git;
#[cfg(test)]
mod memory;
mod repository;

pub use collector::DocumentCollector;
pub use config::{Config, ConfigError, LOCAL_CONFIG_FILE};
pub use git::{git_path, GitHistory};
#[cfg(test)]
pub use memory::MemoryHistory;
pub use repository::{Repository, RepositoryError};

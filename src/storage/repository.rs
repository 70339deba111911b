//! Repository handle
//!
//! Validates a repository root and hands out the history reader and the
//! document collector for it.

use std::path::{Path, PathBuf};

use anyhow::Result;
use thiserror::Error;

use super::{Config, DocumentCollector, GitHistory};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{} does not look like the ERCs repository (missing {dir}/)", .root.display())]
    MissingDocumentsDir { root: PathBuf, dir: String },
}

/// A documents repository on disk
#[derive(Debug)]
pub struct Repository {
    root: PathBuf,
    config: Config,
}

impl Repository {
    /// Opens the repository at `root`, which must contain the documents
    /// directory named by `config`
    pub fn open(root: impl Into<PathBuf>, config: Config) -> Result<Self, RepositoryError> {
        let root = root.into();
        let root = root.canonicalize().unwrap_or(root);

        if !root.join(&config.documents_dir).is_dir() {
            return Err(RepositoryError::MissingDocumentsDir {
                root,
                dir: config.documents_dir.clone(),
            });
        }

        Ok(Self { root, config })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the git reader for this repository
    pub fn history(&self) -> GitHistory {
        GitHistory::with_program(&self.root, self.config.git_program.as_str())
    }

    /// Starts collecting records, optionally filtered by current status
    pub fn collect(&self, status_filter: Option<String>) -> Result<DocumentCollector<GitHistory>> {
        DocumentCollector::new(
            self.root.clone(),
            self.config.clone(),
            self.history(),
            status_filter,
        )
    }
}

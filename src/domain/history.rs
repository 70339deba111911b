//! Read-only access to a document's version history
//!
//! [`History`] is the seam between the finalization logic and the version
//! control system. Production code talks to git through
//! [`GitHistory`](crate::storage::GitHistory); unit tests use an in-memory
//! history.

use chrono::NaiveDate;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("History unavailable for {}: {reason}", .path.display())]
    HistoryUnavailable { path: PathBuf, reason: String },

    #[error("{} does not exist at commit {commit}", .path.display())]
    BlobUnavailable { commit: CommitId, path: PathBuf },

    #[error("Unable to read date of commit {commit}: {reason}")]
    DateUnavailable { commit: CommitId, reason: String },
}

/// Opaque commit identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for log messages
    pub fn short(&self) -> &str {
        self.0.get(..7).unwrap_or(&self.0)
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only history queries for paths relative to a repository root
pub trait History {
    /// Lists commits touching `path`, oldest first, following renames
    fn list_commits(&self, path: &Path) -> Result<Vec<CommitId>, HistoryError>;

    /// Returns the content of `path` as of `commit`
    fn read_blob_at(&self, commit: &CommitId, path: &Path) -> Result<String, HistoryError>;

    /// Returns the author date of `commit`, or `None` when the query
    /// succeeds but reports no date
    fn commit_date(&self, commit: &CommitId) -> Result<Option<NaiveDate>, HistoryError>;
}

impl<H: History + ?Sized> History for &H {
    fn list_commits(&self, path: &Path) -> Result<Vec<CommitId>, HistoryError> {
        (**self).list_commits(path)
    }

    fn read_blob_at(&self, commit: &CommitId, path: &Path) -> Result<String, HistoryError> {
        (**self).read_blob_at(commit, path)
    }

    fn commit_date(&self, commit: &CommitId) -> Result<Option<NaiveDate>, HistoryError> {
        (**self).commit_date(commit)
    }
}

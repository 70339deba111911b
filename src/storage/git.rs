//! Git-backed history
//!
//! Every query is a separate blocking `git -C <root> ...` invocation.
//! Nothing is cached between calls.

use std::path::{Component, Path, PathBuf};
use std::process::Command;

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{CommitId, History, HistoryError};

/// History of a git working copy, read through the `git` executable
#[derive(Debug, Clone)]
pub struct GitHistory {
    root: PathBuf,
    program: String,
}

impl GitHistory {
    /// Creates a reader for the repository at `root` using `git` from `PATH`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_program(root, "git")
    }

    /// Creates a reader that invokes `program` instead of `git`
    pub fn with_program(root: impl Into<PathBuf>, program: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            program: program.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Runs git with `args` and returns trimmed stdout, or stderr on failure
    fn run(&self, args: &[&str]) -> Result<String, String> {
        debug!(args = ?args, "git");

        let output = Command::new(&self.program)
            .arg("-C")
            .arg(&self.root)
            .args(args)
            .output()
            .map_err(|e| format!("failed to run {}: {}", self.program, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(stderr.trim().to_string());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Renders a relative path with `/` separators, as git expects in revspecs
pub fn git_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Parses `git log --format=%H` output into commit ids
fn parse_commit_list(stdout: &str) -> Vec<CommitId> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(CommitId::new)
        .collect()
}

/// Parses `--date=short` output; blank output means no date
fn parse_short_date(stdout: &str) -> Result<Option<NaiveDate>, String> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| format!("unexpected date '{}': {}", trimmed, e))
}

impl History for GitHistory {
    fn list_commits(&self, path: &Path) -> Result<Vec<CommitId>, HistoryError> {
        let rel = git_path(path);
        let stdout = self
            .run(&["log", "--follow", "--format=%H", "--reverse", "--", &rel])
            .map_err(|reason| HistoryError::HistoryUnavailable {
                path: path.to_path_buf(),
                reason,
            })?;

        Ok(parse_commit_list(&stdout))
    }

    fn read_blob_at(&self, commit: &CommitId, path: &Path) -> Result<String, HistoryError> {
        let spec = format!("{}:{}", commit, git_path(path));
        self.run(&["show", &spec]).map_err(|reason| {
            debug!(commit = commit.short(), %reason, "blob unavailable");
            HistoryError::BlobUnavailable {
                commit: commit.clone(),
                path: path.to_path_buf(),
            }
        })
    }

    fn commit_date(&self, commit: &CommitId) -> Result<Option<NaiveDate>, HistoryError> {
        self.run(&["show", "-s", "--format=%ad", "--date=short", commit.as_str()])
            .and_then(|stdout| parse_short_date(&stdout))
            .map_err(|reason| HistoryError::DateUnavailable {
                commit: commit.clone(),
                reason,
            })
    }
}

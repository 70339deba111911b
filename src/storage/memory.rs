//! In-memory history
//!
//! A linear, scripted commit history for exercising the finalization walk
//! and the collector without a git binary.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::domain::{CommitId, History, HistoryError};

#[derive(Debug, Clone)]
struct MemoryCommit {
    id: CommitId,
    date: NaiveDate,
    /// Files written by this commit
    files: HashMap<PathBuf, String>,
}

/// Scripted history, oldest commit first
#[derive(Debug, Default)]
pub struct MemoryHistory {
    commits: Vec<MemoryCommit>,
    hidden_blobs: HashSet<(CommitId, PathBuf)>,
    hidden_dates: HashSet<CommitId>,
    blank_dates: HashSet<CommitId>,
    broken_paths: HashSet<PathBuf>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a commit writing the given `(path, content)` pairs
    pub fn commit<'a>(
        &mut self,
        date: NaiveDate,
        files: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> CommitId {
        let id = CommitId::new(format!("{:040x}", self.commits.len() + 1));
        let files = files
            .into_iter()
            .map(|(path, content)| (PathBuf::from(path), content.to_string()))
            .collect();

        self.commits.push(MemoryCommit {
            id: id.clone(),
            date,
            files,
        });
        id
    }

    /// Makes `path` unreadable at `commit`
    pub fn hide_blob(&mut self, commit: &CommitId, path: &str) {
        self.hidden_blobs.insert((commit.clone(), PathBuf::from(path)));
    }

    /// Makes the date of `commit` unreadable
    pub fn hide_date(&mut self, commit: &CommitId) {
        self.hidden_dates.insert(commit.clone());
    }

    /// Makes `commit` report no date without failing
    pub fn blank_date(&mut self, commit: &CommitId) {
        self.blank_dates.insert(commit.clone());
    }

    /// Makes listing the history of `path` fail
    pub fn break_history(&mut self, path: &str) {
        self.broken_paths.insert(PathBuf::from(path));
    }

    fn position(&self, commit: &CommitId) -> Option<usize> {
        self.commits.iter().position(|c| &c.id == commit)
    }
}

impl History for MemoryHistory {
    fn list_commits(&self, path: &Path) -> Result<Vec<CommitId>, HistoryError> {
        if self.broken_paths.contains(path) {
            return Err(HistoryError::HistoryUnavailable {
                path: path.to_path_buf(),
                reason: "history is broken".to_string(),
            });
        }

        Ok(self
            .commits
            .iter()
            .filter(|c| c.files.contains_key(path))
            .map(|c| c.id.clone())
            .collect())
    }

    fn read_blob_at(&self, commit: &CommitId, path: &Path) -> Result<String, HistoryError> {
        let unavailable = || HistoryError::BlobUnavailable {
            commit: commit.clone(),
            path: path.to_path_buf(),
        };

        if self.hidden_blobs.contains(&(commit.clone(), path.to_path_buf())) {
            return Err(unavailable());
        }

        let end = self.position(commit).ok_or_else(unavailable)?;
        self.commits[..=end]
            .iter()
            .rev()
            .find_map(|c| c.files.get(path).cloned())
            .ok_or_else(unavailable)
    }

    fn commit_date(&self, commit: &CommitId) -> Result<Option<NaiveDate>, HistoryError> {
        let date_error = |reason: &str| HistoryError::DateUnavailable {
            commit: commit.clone(),
            reason: reason.to_string(),
        };

        if self.hidden_dates.contains(commit) {
            return Err(date_error("date is hidden"));
        }

        let date = self
            .position(commit)
            .map(|i| self.commits[i].date)
            .ok_or_else(|| date_error("unknown commit"))?;

        Ok((!self.blank_dates.contains(commit)).then_some(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn lists_only_commits_touching_path() {
        let mut history = MemoryHistory::new();
        let a = history.commit(date(1), [("a.md", "one")]);
        history.commit(date(2), [("b.md", "two")]);
        let c = history.commit(date(3), [("a.md", "three"), ("b.md", "three")]);

        assert_eq!(history.list_commits(Path::new("a.md")).unwrap(), vec![a, c]);
    }

    #[test]
    fn blob_reflects_latest_write_at_or_before_commit() {
        let mut history = MemoryHistory::new();
        history.commit(date(1), [("a.md", "one")]);
        let b = history.commit(date(2), [("b.md", "two")]);

        assert_eq!(history.read_blob_at(&b, Path::new("a.md")).unwrap(), "one");
    }

    #[test]
    fn blob_missing_before_creation() {
        let mut history = MemoryHistory::new();
        let a = history.commit(date(1), [("a.md", "one")]);
        history.commit(date(2), [("b.md", "two")]);

        assert!(matches!(
            history.read_blob_at(&a, Path::new("b.md")),
            Err(HistoryError::BlobUnavailable { .. })
        ));
    }

    #[test]
    fn hidden_and_broken_queries_fail() {
        let mut history = MemoryHistory::new();
        let a = history.commit(date(1), [("a.md", "one")]);
        history.hide_date(&a);
        history.break_history("a.md");

        assert!(history.commit_date(&a).is_err());
        assert!(history.list_commits(Path::new("a.md")).is_err());
    }

    #[test]
    fn blank_date_is_not_an_error() {
        let mut history = MemoryHistory::new();
        let a = history.commit(date(1), [("a.md", "one")]);
        let b = history.commit(date(2), [("a.md", "two")]);
        history.blank_date(&b);

        assert_eq!(history.commit_date(&a), Ok(Some(date(1))));
        assert_eq!(history.commit_date(&b), Ok(None));
    }
}

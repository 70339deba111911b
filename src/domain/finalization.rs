//! Finalization detection
//!
//! Walks a document's commits from oldest to newest and reports the date of
//! the first commit whose front matter `status` moved into the terminal
//! value (`Final` for ERCs). Later oscillations are never visited.
//!
//! Query failures are soft: an unreadable blob skips that commit, and an
//! unreadable date degrades to a [`HistoryNote`] instead of an error.

use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use super::frontmatter::FrontMatter;
use super::history::{CommitId, History};
use super::record::HistoryNote;

/// Outcome of a finalization walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Finalization {
    pub date: Option<NaiveDate>,
    pub note: Option<HistoryNote>,
}

impl Finalization {
    fn new(date: Option<NaiveDate>, note: Option<HistoryNote>) -> Self {
        Self { date, note }
    }

    /// Result for a file whose history could not be listed
    pub fn history_unavailable() -> Self {
        Self::new(None, Some(HistoryNote::HistoryUnavailable))
    }
}

/// Finds the first transition into a terminal status
pub struct FinalizationDetector<'a, H: History + ?Sized> {
    history: &'a H,
    terminal_status: &'a str,
}

impl<'a, H: History + ?Sized> FinalizationDetector<'a, H> {
    pub fn new(history: &'a H, terminal_status: &'a str) -> Self {
        Self {
            history,
            terminal_status,
        }
    }

    /// Walks `commits` (oldest first) for the document at `path`
    pub fn detect(&self, path: &Path, commits: &[CommitId]) -> Finalization {
        let note = match commits.len() {
            0 => return Finalization::new(None, Some(HistoryNote::NoCommits)),
            1 => Some(HistoryNote::SingleCommit),
            _ => None,
        };

        let mut previous_status: Option<String> = None;

        for commit in commits {
            let blob = match self.history.read_blob_at(commit, path) {
                Ok(blob) => blob,
                Err(e) => {
                    debug!(commit = commit.short(), error = %e, "skipping commit");
                    continue;
                }
            };

            let front_matter = FrontMatter::parse(&blob);
            let status = front_matter.get_or_empty("status");

            let was_terminal = previous_status
                .as_deref()
                .is_some_and(|s| self.is_terminal(s));

            if self.is_terminal(status) && !was_terminal {
                debug!(
                    path = %path.display(),
                    commit = commit.short(),
                    from = previous_status.as_deref().unwrap_or(""),
                    to = status,
                    "found status transition"
                );
                return match self.history.commit_date(commit) {
                    Ok(date) => Finalization::new(date, note),
                    Err(e) => {
                        debug!(commit = commit.short(), error = %e, "commit date unavailable");
                        Finalization::new(None, note.or(Some(HistoryNote::DateUnavailable)))
                    }
                };
            }

            previous_status = Some(status.to_string());
        }

        Finalization::new(None, note)
    }

    fn is_terminal(&self, status: &str) -> bool {
        status.eq_ignore_ascii_case(self.terminal_status)
    }
}

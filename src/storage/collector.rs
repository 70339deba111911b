//! Document collection
//!
//! Enumerates the documents directory, filters documents by category and
//! status, and lazily produces one [`DocumentRecord`] per survivor.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::config::Config;
use super::git::git_path;
use crate::domain::{DocumentRecord, Finalization, FinalizationDetector, FrontMatter, History};

/// Lazy sequence of records for the documents in a repository.
///
/// Documents are visited in lexicographic path order. Each call to
/// [`Iterator::next`] reads and filters documents until one matches, then
/// walks its history. A document that cannot be read from the working tree
/// is yielded as an error.
pub struct DocumentCollector<H: History> {
    root: PathBuf,
    config: Config,
    history: H,
    status_filter: Option<String>,
    pending: std::vec::IntoIter<PathBuf>,
    emitted: usize,
}

impl<H: History> DocumentCollector<H> {
    /// Creates a collector over `<root>/<documents_dir>/*.<extension>`.
    ///
    /// An empty status filter matches every status.
    pub fn new(
        root: impl Into<PathBuf>,
        config: Config,
        history: H,
        status_filter: Option<String>,
    ) -> Result<Self> {
        let root = root.into();
        let paths = list_documents(&root.join(&config.documents_dir), &config.extension)?;
        debug!(count = paths.len(), "found candidate documents");

        Ok(Self {
            root,
            config,
            history,
            status_filter: status_filter.filter(|s| !s.is_empty()),
            pending: paths.into_iter(),
            emitted: 0,
        })
    }

    /// Builds the record for `path`, or `None` if it is filtered out
    fn collect_one(&self, path: &Path) -> Result<Option<DocumentRecord>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read document: {}", path.display()))?;
        let front_matter = FrontMatter::parse(&content);

        if !self.matches(&front_matter) {
            debug!(path = %path.display(), "filtered out");
            return Ok(None);
        }

        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        let finalization = match self.history.list_commits(rel) {
            Ok(commits) => FinalizationDetector::new(&self.history, &self.config.terminal_status)
                .detect(rel, &commits),
            Err(e) => {
                debug!(error = %e, "history unavailable");
                Finalization::history_unavailable()
            }
        };

        Ok(Some(DocumentRecord {
            id: self.document_id(&front_matter, path),
            title: front_matter.get_or_empty("title").to_string(),
            status: front_matter.get_or_empty("status").to_string(),
            created: front_matter.get("created").map(str::to_string),
            finalized: finalization.date,
            path: git_path(rel),
            history_note: finalization.note,
        }))
    }

    fn matches(&self, front_matter: &FrontMatter) -> bool {
        let category = front_matter.get_or_empty("category");
        if !category.eq_ignore_ascii_case(&self.config.category) {
            return false;
        }

        match &self.status_filter {
            Some(wanted) => front_matter
                .get_or_empty("status")
                .eq_ignore_ascii_case(wanted),
            None => true,
        }
    }

    /// Uses the configured id field, falling back to the last `-` segment
    /// of the file stem (`eip-721.md` -> `721`)
    fn document_id(&self, front_matter: &FrontMatter, path: &Path) -> String {
        if let Some(id) = front_matter.get(&self.config.id_field) {
            return id.to_string();
        }

        path.file_stem()
            .map(|stem| stem.to_string_lossy())
            .and_then(|stem| stem.rsplit('-').next().map(str::to_string))
            .unwrap_or_default()
    }
}

impl<H: History> Iterator for DocumentCollector<H> {
    type Item = Result<DocumentRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(path) = self.pending.next() {
            match self.collect_one(&path) {
                Ok(Some(record)) => {
                    self.emitted += 1;
                    return Some(Ok(record));
                }
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }

        if self.emitted > 0 {
            info!(records = self.emitted, "collection finished");
            self.emitted = 0;
        }
        None
    }
}

/// Lists visible files with `extension` directly under `dir`, sorted
fn list_documents(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();

        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if !hidden && path.is_file() && path.extension().is_some_and(|e| e == extension) {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

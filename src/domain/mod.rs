//! Domain models for erc-finality
//!
//! Front matter parsing, records, and the finalization walk. Version
//! control access goes through the [`History`] trait only.

mod finalization;
mod frontmatter;
mod history;
mod record;

pub use finalization::{Finalization, FinalizationDetector};
pub use frontmatter::FrontMatter;
pub use history::{CommitId, History, HistoryError};
pub use record::{DocumentRecord, HistoryNote, CSV_HEADER, DATE_FORMAT};

//! erc-finality - ERC metadata and finalization dates from git history
//!
//! Scans the `ERCS` directory of an ERCs repository checkout, reads each
//! document's front matter, and walks its git history to find when its
//! status first became `Final`. Results are printed as CSV.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{DocumentRecord, FrontMatter, HistoryNote};
pub use storage::{Config, DocumentCollector, GitHistory, Repository};

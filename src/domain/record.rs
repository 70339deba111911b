//! Document records and their CSV rendering
//!
//! One [`DocumentRecord`] is produced per matching document. Records are
//! plain values: the collector builds them, the CLI prints them, nothing
//! stores them.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Column header for CSV output
pub const CSV_HEADER: &str = "eip,title,status,created,finalized,path,history_note";

/// Date format used for finalization dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Diagnostic attached to a record when history was missing or limited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HistoryNote {
    /// The file has no commits touching it
    #[serde(rename = "no commits found")]
    NoCommits,

    /// Only a single commit touches the file
    #[serde(rename = "only one commit available")]
    SingleCommit,

    /// Listing the file's history failed
    #[serde(rename = "unable to load git history")]
    HistoryUnavailable,

    /// The transition commit's date could not be read
    #[serde(rename = "unable to read commit date")]
    DateUnavailable,
}

impl HistoryNote {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryNote::NoCommits => "no commits found",
            HistoryNote::SingleCommit => "only one commit available",
            HistoryNote::HistoryUnavailable => "unable to load git history",
            HistoryNote::DateUnavailable => "unable to read commit date",
        }
    }
}

impl fmt::Display for HistoryNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata extracted for a single document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    /// Proposal number from front matter, or the file name suffix
    pub id: String,

    pub title: String,

    /// Status as of the working tree
    pub status: String,

    /// Free-text `created` field, if present
    pub created: Option<String>,

    /// Date of the first commit that moved the status to the terminal value
    #[serde(serialize_with = "serialize_date")]
    pub finalized: Option<NaiveDate>,

    /// Repository-relative path with `/` separators
    pub path: String,

    pub history_note: Option<HistoryNote>,
}

impl DocumentRecord {
    /// Renders the record as a single CSV line (without trailing newline).
    ///
    /// Commas and line breaks in the title and history note are replaced by
    /// spaces. No other escaping is done.
    pub fn to_csv_row(&self) -> String {
        let finalized = self
            .finalized
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default();
        let title = flatten_field(&self.title);
        let note = flatten_field(self.history_note.map(|n| n.as_str()).unwrap_or(""));

        [
            self.id.as_str(),
            title.as_str(),
            self.status.as_str(),
            self.created.as_deref().unwrap_or(""),
            finalized.as_str(),
            self.path.as_str(),
            note.as_str(),
        ]
        .join(",")
    }
}

/// Replaces characters that would break a one-line CSV row
fn flatten_field(value: &str) -> String {
    value.replace([',', '\n', '\r'], " ")
}

fn serialize_date<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match date {
        Some(d) => serializer.serialize_str(&d.format(DATE_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}

//! Output formatting for collected records

use std::io::Write;

use anyhow::{Context, Result};

use crate::domain::{DocumentRecord, CSV_HEADER};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One comma-separated line per record
    #[default]
    Csv,
    /// One JSON object per line
    Json,
}

/// Writes records to a sink in the selected format
pub struct Output<W: Write> {
    writer: W,
    format: OutputFormat,
    rows: usize,
}

impl<W: Write> Output<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            rows: 0,
        }
    }

    /// Prints the CSV header row (ignored in JSON mode)
    pub fn header(&mut self) -> Result<()> {
        if self.format == OutputFormat::Csv {
            writeln!(self.writer, "{}", CSV_HEADER).context("Failed to write header")?;
        }
        Ok(())
    }

    /// Prints one record
    pub fn record(&mut self, record: &DocumentRecord) -> Result<()> {
        let written = match self.format {
            OutputFormat::Csv => writeln!(self.writer, "{}", record.to_csv_row()),
            OutputFormat::Json => {
                let line = serde_json::to_string(record).context("Failed to serialize record")?;
                writeln!(self.writer, "{}", line)
            }
        };
        written.with_context(|| format!("Failed to write record {}", record.id))?;

        // Rows already written survive a later fatal error.
        self.writer.flush().context("Failed to flush output")?;
        self.rows += 1;
        Ok(())
    }

    /// Number of records written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

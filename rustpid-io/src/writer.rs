//! Writers for labeled centroid tables.

use crate::error::Result;
use crate::{LABEL_COLUMN, X_COLUMN, Y_COLUMN};
use rustpid_core::{CentroidTable, LabelCounts};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Output encodings for labeled tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `Xpos,Ypos,Particle Label` rows.
    Csv,
    /// Centroid records plus a per-class summary.
    Json,
}

impl OutputFormat {
    /// Infers the format from a file extension.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct LabeledRecord {
    x: f64,
    y: f64,
    label: Option<&'static str>,
}

#[derive(Serialize)]
struct LabeledDocument {
    centroids: Vec<LabeledRecord>,
    summary: LabelCounts,
}

/// Writer for labeled centroid tables.
pub struct LabeledTableWriter<W: Write = BufWriter<File>> {
    writer: W,
}

impl LabeledTableWriter<BufWriter<File>> {
    /// Creates a new file writer.
    ///
    /// # Errors
    /// Fails if the file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> LabeledTableWriter<W> {
    /// Wraps an existing writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes `table` in `format`.
    ///
    /// # Errors
    /// Propagates write and encoding failures.
    pub fn write(&mut self, table: &CentroidTable, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Csv => self.write_csv(table),
            OutputFormat::Json => self.write_json(table),
        }
    }

    /// Writes the table as CSV. Unset labels are empty cells.
    ///
    /// # Errors
    /// Propagates write failures.
    pub fn write_csv(&mut self, table: &CentroidTable) -> Result<()> {
        let mut csv = csv::Writer::from_writer(&mut self.writer);
        csv.write_record([X_COLUMN, Y_COLUMN, LABEL_COLUMN])?;
        for row in table {
            csv.write_record([
                row.x.to_string(),
                row.y.to_string(),
                row.label.map(|class| class.label()).unwrap_or_default().to_string(),
            ])?;
        }
        csv.flush()?;
        drop(csv);
        self.writer.flush()?;
        Ok(())
    }

    /// Writes the table as a JSON document with a label summary.
    ///
    /// # Errors
    /// Propagates write and serialization failures.
    pub fn write_json(&mut self, table: &CentroidTable) -> Result<()> {
        let document = LabeledDocument {
            centroids: table
                .iter()
                .map(|row| LabeledRecord {
                    x: row.x,
                    y: row.y,
                    label: row.label.map(|class| class.label()),
                })
                .collect(),
            summary: table.label_counts(),
        };
        serde_json::to_writer_pretty(&mut self.writer, &document)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes the writer.
    ///
    /// # Errors
    /// Propagates flush failures.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

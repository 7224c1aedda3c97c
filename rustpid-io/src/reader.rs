//! CSV reader for centroid tables.

use crate::error::{Error, Result};
use crate::{LABEL_COLUMN, X_COLUMN, Y_COLUMN};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use rustpid_core::{Centroid, CentroidTable, ParticleClass};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads a centroid table from a CSV file.
///
/// See [`read_centroids`] for the expected layout.
///
/// # Errors
/// Fails if the file cannot be opened or is not a well-formed centroid table.
pub fn read_centroids_csv<P: AsRef<Path>>(path: P) -> Result<CentroidTable> {
    let path = path.as_ref();
    debug!("reading centroids from {}", path.display());
    let file = File::open(path)?;
    read_centroids(BufReader::new(file))
}

/// Reads a centroid table from CSV data.
///
/// The header row must name `Xpos` and `Ypos` columns holding numbers. A
/// `Particle Label` column, if present, supplies existing labels (empty cells
/// are unset). Other columns are ignored.
///
/// # Errors
/// Returns [`Error::MissingColumn`] or [`Error::InvalidValue`] for malformed
/// tables and a core [`EmptyTable`](rustpid_core::Error::EmptyTable) error
/// when there are no data rows.
pub fn read_centroids<R: Read>(reader: R) -> Result<CentroidTable> {
    let mut csv = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = csv.headers()?.clone();
    let x_index = column_index(&headers, X_COLUMN)?;
    let y_index = column_index(&headers, Y_COLUMN)?;
    let label_index = headers.iter().position(|name| name == LABEL_COLUMN);

    let mut rows = Vec::new();
    for (row, record) in csv.records().enumerate() {
        let record = record?;
        let x = parse_coordinate(&record, x_index, row, X_COLUMN)?;
        let y = parse_coordinate(&record, y_index, row, Y_COLUMN)?;
        let label = match label_index.and_then(|index| record.get(index)) {
            Some(text) if !text.is_empty() => {
                Some(text.parse::<ParticleClass>().map_err(|_| Error::InvalidValue {
                    row,
                    column: LABEL_COLUMN.to_string(),
                    value: text.to_string(),
                })?)
            }
            _ => None,
        };
        rows.push(Centroid { x, y, label });
    }

    debug!("read {} centroids", rows.len());
    Ok(CentroidTable::new(rows)?)
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| Error::MissingColumn(name.to_string()))
}

fn parse_coordinate(record: &StringRecord, index: usize, row: usize, column: &str) -> Result<f64> {
    let text = record.get(index).unwrap_or_default();
    text.parse::<f64>().map_err(|_| Error::InvalidValue {
        row,
        column: column.to_string(),
        value: text.to_string(),
    })
}

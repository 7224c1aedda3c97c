//! Centroid records and the table the classifier labels in place.

use crate::error::{Error, Result};
use crate::particle::ParticleClass;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single cluster centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Centroid {
    /// Centroid X coordinate (detector units).
    pub x: f64,
    /// Centroid Y coordinate (detector units).
    pub y: f64,
    /// Assigned particle class, `None` while unclassified.
    pub label: Option<ParticleClass>,
}

impl Centroid {
    /// Creates an unlabeled centroid.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, label: None }
    }

    /// Creates a centroid carrying an existing label.
    #[must_use]
    pub fn with_label(x: f64, y: f64, label: ParticleClass) -> Self {
        Self {
            x,
            y,
            label: Some(label),
        }
    }
}

/// Ordered collection of centroids, one row per detected cluster.
///
/// Row order is significant: the reference-based Triton and Deuteron rules
/// only see labels of rows visited earlier in the same pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "TableRows")
)]
pub struct CentroidTable {
    rows: Vec<Centroid>,
}

/// Unchecked deserialized form; converted through [`CentroidTable::new`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct TableRows {
    rows: Vec<Centroid>,
}

#[cfg(feature = "serde")]
impl TryFrom<TableRows> for CentroidTable {
    type Error = Error;

    fn try_from(raw: TableRows) -> Result<Self> {
        Self::new(raw.rows)
    }
}

impl CentroidTable {
    /// Creates a table from centroid records.
    ///
    /// # Errors
    /// Returns [`Error::EmptyTable`] when `rows` is empty.
    pub fn new(rows: Vec<Centroid>) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::EmptyTable);
        }
        Ok(Self { rows })
    }

    /// Creates an unlabeled table from parallel `Xpos` / `Ypos` columns.
    ///
    /// # Errors
    /// Returns [`Error::LengthMismatch`] when the columns differ in length
    /// and [`Error::EmptyTable`] when both are empty.
    pub fn from_columns(xpos: &[f64], ypos: &[f64]) -> Result<Self> {
        if xpos.len() != ypos.len() {
            return Err(Error::LengthMismatch {
                x: xpos.len(),
                y: ypos.len(),
            });
        }
        Self::new(
            xpos.iter()
                .zip(ypos)
                .map(|(&x, &y)| Centroid::new(x, y))
                .collect(),
        )
    }

    /// Creates a table from parallel coordinate and label columns.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] when `labels` does not have one entry
    /// per row, plus the errors of [`from_columns`](Self::from_columns).
    pub fn from_labeled_columns(
        xpos: &[f64],
        ypos: &[f64],
        labels: &[Option<ParticleClass>],
    ) -> Result<Self> {
        let mut table = Self::from_columns(xpos, ypos)?;
        if labels.len() != table.len() {
            return Err(Error::InvalidInput(format!(
                "{} labels for {} rows",
                labels.len(),
                table.len()
            )));
        }
        for (row, &label) in table.rows.iter_mut().zip(labels) {
            row.label = label;
        }
        Ok(table)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false: every constructor, deserialization included, rejects
    /// empty tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the rows as a slice.
    #[must_use]
    pub fn rows(&self) -> &[Centroid] {
        &self.rows
    }

    /// Returns the row at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Centroid> {
        self.rows.get(index)
    }

    /// Returns an iterator over the rows.
    pub fn iter(&self) -> impl Iterator<Item = &Centroid> {
        self.rows.iter()
    }

    /// Returns the label of the row at `index`.
    #[must_use]
    pub fn label(&self, index: usize) -> Option<ParticleClass> {
        self.rows.get(index).and_then(|row| row.label)
    }

    /// Returns the labels of all rows in order.
    #[must_use]
    pub fn labels(&self) -> Vec<Option<ParticleClass>> {
        self.rows.iter().map(|row| row.label).collect()
    }

    pub(crate) fn set_label(&mut self, index: usize, class: ParticleClass) {
        self.rows[index].label = Some(class);
    }

    /// Clears every label.
    pub fn reset_labels(&mut self) {
        for row in &mut self.rows {
            row.label = None;
        }
    }

    /// Summarizes the labels currently assigned.
    #[must_use]
    pub fn label_counts(&self) -> LabelCounts {
        let mut counts = LabelCounts::default();
        for row in &self.rows {
            match row.label {
                Some(ParticleClass::Proton) => counts.protons += 1,
                Some(ParticleClass::Alpha) => counts.alphas += 1,
                Some(ParticleClass::Triton) => counts.tritons += 1,
                Some(ParticleClass::Deuteron) => counts.deuterons += 1,
                None => counts.unclassified += 1,
            }
        }
        counts
    }
}

impl<'a> IntoIterator for &'a CentroidTable {
    type Item = &'a Centroid;
    type IntoIter = std::slice::Iter<'a, Centroid>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Per-class label counts of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LabelCounts {
    pub protons: usize,
    pub alphas: usize,
    pub tritons: usize,
    pub deuterons: usize,
    pub unclassified: usize,
}

impl LabelCounts {
    /// Returns the count for one class.
    #[must_use]
    pub fn get(&self, class: ParticleClass) -> usize {
        match class {
            ParticleClass::Proton => self.protons,
            ParticleClass::Alpha => self.alphas,
            ParticleClass::Triton => self.tritons,
            ParticleClass::Deuteron => self.deuterons,
        }
    }

    /// Number of rows that received a label.
    #[must_use]
    pub fn classified(&self) -> usize {
        self.protons + self.alphas + self.tritons + self.deuterons
    }
}

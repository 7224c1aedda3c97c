//! Classifier configuration.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Detector calibration cutoffs used by the Proton and Alpha rules.
///
/// All comparisons against these values are strict.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Thresholds {
    /// A lowest-right proton must have `y < proton_max_y`.
    pub proton_max_y: f64,
    /// An alpha must have `x < alpha_max_x`.
    pub alpha_max_x: f64,
    /// An alpha must have `y > alpha_min_y`.
    pub alpha_min_y: f64,
}

impl Thresholds {
    pub const DEFAULT_PROTON_MAX_Y: f64 = 1100.0;
    pub const DEFAULT_ALPHA_MAX_X: f64 = 800.0;
    pub const DEFAULT_ALPHA_MIN_Y: f64 = 1000.0;
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            proton_max_y: Self::DEFAULT_PROTON_MAX_Y,
            alpha_max_x: Self::DEFAULT_ALPHA_MAX_X,
            alpha_min_y: Self::DEFAULT_ALPHA_MIN_Y,
        }
    }
}

/// How reference-based Triton and Deuteron rules pick the rows they compare
/// against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReferenceMode {
    /// Each reference condition holds if any labeled row satisfies it.
    #[default]
    AnyNeighbor,
    /// Only the last row index (N - 1) is inspected, and it must satisfy every
    /// condition of a reference branch on its own.
    LastNeighbor,
}

/// Order in which rows are classified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VisitOrder {
    /// Ascending row index.
    #[default]
    RowIndex,
    /// Explicit permutation of the row indices.
    Explicit(Vec<usize>),
}

impl VisitOrder {
    /// Resolves the order for a table of `n` rows.
    ///
    /// # Errors
    /// Returns [`Error::InvalidVisitOrder`] if an explicit order is not a
    /// permutation of `0..n`.
    pub fn resolve(&self, n: usize) -> Result<Vec<usize>> {
        match self {
            Self::RowIndex => Ok((0..n).collect()),
            Self::Explicit(order) => {
                if order.len() != n {
                    return Err(Error::InvalidVisitOrder(format!(
                        "expected {n} indices, got {}",
                        order.len()
                    )));
                }
                let mut seen = vec![false; n];
                for &index in order {
                    if index >= n {
                        return Err(Error::InvalidVisitOrder(format!(
                            "index {index} out of range for {n} rows"
                        )));
                    }
                    if std::mem::replace(&mut seen[index], true) {
                        return Err(Error::InvalidVisitOrder(format!(
                            "index {index} listed twice"
                        )));
                    }
                }
                Ok(order.clone())
            }
        }
    }
}

/// Configuration for [`ParticleClassifier`](crate::ParticleClassifier).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassifierConfig {
    /// Calibration cutoffs.
    pub thresholds: Thresholds,
    /// Reference-row resolution for the Triton and Deuteron reference rules.
    pub reference_mode: ReferenceMode,
    /// Row visitation order.
    pub visit_order: VisitOrder,
    /// Clear existing labels before classifying.
    pub reset_labels: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            reference_mode: ReferenceMode::default(),
            visit_order: VisitOrder::default(),
            reset_labels: true,
        }
    }
}

impl ClassifierConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets all calibration cutoffs.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Sets the proton y cutoff.
    #[must_use]
    pub fn with_proton_max_y(mut self, value: f64) -> Self {
        self.thresholds.proton_max_y = value;
        self
    }

    /// Sets the alpha x cutoff.
    #[must_use]
    pub fn with_alpha_max_x(mut self, value: f64) -> Self {
        self.thresholds.alpha_max_x = value;
        self
    }

    /// Sets the alpha y cutoff.
    #[must_use]
    pub fn with_alpha_min_y(mut self, value: f64) -> Self {
        self.thresholds.alpha_min_y = value;
        self
    }

    /// Sets the reference mode.
    #[must_use]
    pub fn with_reference_mode(mut self, mode: ReferenceMode) -> Self {
        self.reference_mode = mode;
        self
    }

    /// Sets the visit order.
    #[must_use]
    pub fn with_visit_order(mut self, order: VisitOrder) -> Self {
        self.visit_order = order;
        self
    }

    /// Sets whether labels are cleared before classifying.
    #[must_use]
    pub fn with_reset_labels(mut self, reset: bool) -> Self {
        self.reset_labels = reset;
        self
    }
}

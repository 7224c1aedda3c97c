//! Rule-based particle classification from relative centroid geometry.
//!
//! Each row is tested against the Proton, Alpha, Triton and Deuteron rule
//! sets in that order and receives the first class whose rules hold. Rows
//! matching nothing keep their current label (unset after a reset).
//!
//! The Triton and Deuteron rules have reference branches that look at labels
//! assigned to other rows earlier in the same pass. Classification is thus a
//! single pass with a caller-controlled visit order: reference classes
//! (alphas, then deuterons and protons) should be visited before the rows that
//! depend on them, either by pre-ordering the table or through
//! [`VisitOrder::Explicit`](crate::VisitOrder::Explicit).

use crate::centroid::CentroidTable;
use crate::config::{ClassifierConfig, ReferenceMode};
use crate::error::Result;
use crate::particle::ParticleClass;
use crate::relative::{RelativePositions, RowGeometry};
use log::{debug, trace};

/// Required relation between the row under test and a labeled reference row,
/// expressed on `(Xrel[i][j], Yrel[i][j])`.
#[derive(Clone, Copy)]
struct Reference {
    class: ParticleClass,
    relation: fn(f64, f64) -> bool,
}

impl Reference {
    fn holds(&self, table: &CentroidTable, rel: &RelativePositions, i: usize, j: usize) -> bool {
        table.label(j) == Some(self.class) && (self.relation)(rel.dx(i, j), rel.dy(i, j))
    }
}

fn below(_dx: f64, dy: f64) -> bool {
    dy > 0.0
}

fn above_left_of(dx: f64, dy: f64) -> bool {
    dx > 0.0 && dy < 0.0
}

fn below_right_of(dx: f64, dy: f64) -> bool {
    dx < 0.0 && dy > 0.0
}

/// Below the alphas and above-left of the deuterons.
const TRITON_REFERENCES: [Reference; 2] = [
    Reference {
        class: ParticleClass::Alpha,
        relation: below,
    },
    Reference {
        class: ParticleClass::Deuteron,
        relation: above_left_of,
    },
];

/// Below the alphas, below-right of the tritons, above-left of the protons.
const DEUTERON_REFERENCES: [Reference; 3] = [
    Reference {
        class: ParticleClass::Alpha,
        relation: below,
    },
    Reference {
        class: ParticleClass::Triton,
        relation: below_right_of,
    },
    Reference {
        class: ParticleClass::Proton,
        relation: above_left_of,
    },
];

/// Per-row inputs shared by all rule sets.
struct RowContext {
    index: usize,
    x: f64,
    y: f64,
    geometry: RowGeometry,
}

/// Assigns particle classes to the rows of a [`CentroidTable`].
///
/// The relative-position matrices are owned working state, rebuilt on every
/// call to [`classify`](Self::classify).
#[derive(Debug, Clone, Default)]
pub struct ParticleClassifier {
    config: ClassifierConfig,
    relative: RelativePositions,
}

impl ParticleClassifier {
    /// Creates a classifier with the given configuration.
    #[must_use]
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            relative: RelativePositions::default(),
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Replaces the configuration.
    pub fn configure(&mut self, config: ClassifierConfig) {
        self.config = config;
    }

    /// Matrices computed by the last [`classify`](Self::classify) call.
    #[must_use]
    pub fn relative_positions(&self) -> &RelativePositions {
        &self.relative
    }

    /// Labels `table` in place and returns it.
    ///
    /// # Errors
    /// Returns [`Error::InvalidVisitOrder`](crate::Error::InvalidVisitOrder)
    /// if the configured order does not fit the table. No label is touched in
    /// that case.
    pub fn classify<'t>(
        &mut self,
        table: &'t mut CentroidTable,
    ) -> Result<&'t mut CentroidTable> {
        let order = self.config.visit_order.resolve(table.len())?;
        if self.config.reset_labels {
            table.reset_labels();
        }
        self.relative.rebuild(table);
        let max_separation = self.relative.max_x_separation();

        for index in order {
            let row = table.rows()[index];
            let ctx = RowContext {
                index,
                x: row.x,
                y: row.y,
                geometry: self.relative.row_geometry(index),
            };
            trace!("row {index}: {:?}", ctx.geometry);

            match self.first_match(table, &ctx, max_separation) {
                Some(class) => {
                    debug!("row {index} ({}, {}) -> {class}", row.x, row.y);
                    table.set_label(index, class);
                }
                None => debug!("row {index} ({}, {}) matches no rule", row.x, row.y),
            }
        }

        Ok(table)
    }

    fn first_match(
        &self,
        table: &CentroidTable,
        ctx: &RowContext,
        max_separation: f64,
    ) -> Option<ParticleClass> {
        ParticleClass::ALL.into_iter().find(|&class| match class {
            ParticleClass::Proton => self.is_proton(table.len(), ctx, max_separation),
            ParticleClass::Alpha => self.is_alpha(table.len(), ctx),
            ParticleClass::Triton => self.is_triton(table, ctx),
            ParticleClass::Deuteron => self.is_deuteron(table, ctx),
        })
    }

    /// Lowest-right group, or the far end of the widest x-separation.
    fn is_proton(&self, n: usize, ctx: &RowContext, max_separation: f64) -> bool {
        let others = n - 1;
        let g = ctx.geometry;
        let lowest_right =
            g.neg_x >= others && ctx.y < self.config.thresholds.proton_max_y && g.pos_y >= others;
        let furthest = self.relative.count_x_equal(ctx.index, -max_separation) == 1;
        lowest_right || furthest
    }

    /// Highest group, in the upper-left corner.
    fn is_alpha(&self, n: usize, ctx: &RowContext) -> bool {
        let thresholds = &self.config.thresholds;
        ctx.geometry.neg_y == n - 1
            && ctx.x < thresholds.alpha_max_x
            && ctx.y > thresholds.alpha_min_y
    }

    fn is_triton(&self, table: &CentroidTable, ctx: &RowContext) -> bool {
        let n = table.len();
        let g = ctx.geometry;
        let others = n - 1;

        // Second highest and left-most of four.
        let of_four = n == 4 && g.neg_y >= 2 && g.pos_y >= 1 && g.pos_x >= others;
        // Middle and left-most of three (no protons).
        let of_three = n == 3 && g.neg_y >= 1 && g.pos_y >= 1 && g.pos_x >= others;

        of_four || of_three || self.references_hold(table, ctx.index, &TRITON_REFERENCES)
    }

    fn is_deuteron(&self, table: &CentroidTable, ctx: &RowContext) -> bool {
        let n = table.len();
        let g = ctx.geometry;

        // Middle of three (tritons or alphas missing).
        let middle_of_three = n == 3 && g.neg_y >= 1 && g.pos_y >= 1;
        // Top-right of three (protons missing).
        let upper_of_three = n == 3 && g.neg_y >= 2 && g.neg_x >= 2;
        // Second from the right of four.
        let of_four = n == 4 && g.neg_x >= 2 && g.pos_x >= 1 && g.pos_y >= 2 && g.neg_y >= 1;

        middle_of_three
            || upper_of_three
            || of_four
            || self.references_hold(table, ctx.index, &DEUTERON_REFERENCES)
    }

    fn references_hold(&self, table: &CentroidTable, i: usize, references: &[Reference]) -> bool {
        let n = table.len();
        match self.config.reference_mode {
            ReferenceMode::AnyNeighbor => references
                .iter()
                .all(|reference| (0..n).any(|j| reference.holds(table, &self.relative, i, j))),
            ReferenceMode::LastNeighbor => references
                .iter()
                .all(|reference| reference.holds(table, &self.relative, i, n - 1)),
        }
    }
}

/// Labels `table` with the default configuration.
///
/// # Errors
/// Never fails for the default row-index order; the signature matches
/// [`ParticleClassifier::classify`].
pub fn classify_particles(table: &mut CentroidTable) -> Result<&mut CentroidTable> {
    ParticleClassifier::default().classify(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::centroid::Centroid;
    use crate::config::VisitOrder;
    use crate::error::Error;

    fn labels(xs: &[f64], ys: &[f64]) -> Vec<Option<ParticleClass>> {
        let mut table = CentroidTable::from_columns(xs, ys).unwrap();
        classify_particles(&mut table).unwrap().labels()
    }

    #[test]
    fn test_single_row_prefers_proton_over_alpha() {
        // (500, 1050) satisfies both the lowest-right proton rule and the
        // alpha rule with no other rows present.
        assert_eq!(labels(&[500.0], &[1050.0]), vec![Some(ParticleClass::Proton)]);
    }

    #[test]
    fn test_proton_y_cutoff_is_strict() {
        // Two rows share the minimum x, so the widest-separation branch
        // cannot fire for the right-hand row.
        let xs = [900.0, 100.0, 100.0];
        assert_eq!(labels(&xs, &[1100.0, 1500.0, 1400.0])[0], None);
        assert_eq!(
            labels(&xs, &[1099.9, 1500.0, 1400.0])[0],
            Some(ParticleClass::Proton)
        );
    }

    #[test]
    fn test_alpha_cutoffs_are_strict() {
        // Tied maximum x on rows 0 and 2 keeps the widest-separation proton
        // branch off row 1, and row 1 is never the lowest.
        let at_x = labels(&[900.0, 800.0, 900.0], &[500.0, 1500.0, 400.0]);
        assert_eq!(at_x[1], None);
        let inside_x = labels(&[900.0, 799.0, 900.0], &[500.0, 1500.0, 400.0]);
        assert_eq!(inside_x[1], Some(ParticleClass::Alpha));
    }

    #[test]
    fn test_alpha_min_y_is_strict() {
        let table_labels = labels(&[900.0, 100.0, 900.0], &[500.0, 1000.0, 400.0]);
        assert_ne!(table_labels[1], Some(ParticleClass::Alpha));
    }

    #[test]
    fn test_three_row_layout() {
        // Row 1 sits between the others in y but is not left-most.
        let got = labels(&[100.0, 150.0, 600.0], &[1500.0, 1200.0, 900.0]);
        assert_eq!(got[2], Some(ParticleClass::Proton));
        assert_eq!(got[0], Some(ParticleClass::Alpha));
        assert_eq!(got[1], Some(ParticleClass::Deuteron));
    }

    #[test]
    fn test_three_row_triton_left_most_middle() {
        // Row 0 is left-most and in the middle in y.
        let got = labels(&[100.0, 300.0, 900.0], &[1200.0, 1500.0, 800.0]);
        assert_eq!(got[0], Some(ParticleClass::Triton));
        assert_eq!(got[1], Some(ParticleClass::Alpha));
        assert_eq!(got[2], Some(ParticleClass::Proton));
    }

    #[test]
    fn test_four_row_count_rules() {
        // Triton: left-most, two below, one above. Deuteron: second from the
        // right, two above, one below.
        let xs = [300.0, 100.0, 500.0, 900.0];
        let ys = [1500.0, 1200.0, 800.0, 600.0];
        let got = labels(&xs, &ys);
        assert_eq!(
            got,
            vec![
                Some(ParticleClass::Alpha),
                Some(ParticleClass::Triton),
                Some(ParticleClass::Deuteron),
                Some(ParticleClass::Proton),
            ]
        );
    }

    #[test]
    fn test_three_row_upper_right_deuteron() {
        // Tied minimum x keeps the widest-separation proton branch off row 0,
        // and x = 900 fails the alpha cutoff. Only the top-right rule is left.
        let got = labels(&[900.0, 100.0, 100.0], &[1500.0, 1000.0, 900.0]);
        assert_eq!(
            got,
            vec![
                Some(ParticleClass::Deuteron),
                Some(ParticleClass::Deuteron),
                None,
            ]
        );
    }

    #[test]
    fn test_four_row_triton_without_references() {
        // Row 1 is visited first, so no reference label exists and only the
        // left-most-of-four rule can label it.
        let mut table = CentroidTable::from_columns(
            &[300.0, 100.0, 900.0, 900.0],
            &[1500.0, 1200.0, 800.0, 600.0],
        )
        .unwrap();
        let mut classifier = ParticleClassifier::new(
            ClassifierConfig::new().with_visit_order(VisitOrder::Explicit(vec![1, 0, 2, 3])),
        );
        classifier.classify(&mut table).unwrap();
        assert_eq!(
            table.labels(),
            vec![
                Some(ParticleClass::Alpha),
                Some(ParticleClass::Triton),
                Some(ParticleClass::Proton),
                Some(ParticleClass::Proton),
            ]
        );
    }

    #[test]
    fn test_nan_row_is_unclassified() {
        let got = labels(&[f64::NAN, 100.0, 900.0], &[f64::NAN, 1500.0, 800.0]);
        assert_eq!(got[0], None);
    }

    #[test]
    fn test_invalid_order_leaves_labels_untouched() {
        let mut table = CentroidTable::new(vec![
            Centroid::with_label(1.0, 1.0, ParticleClass::Alpha),
            Centroid::new(2.0, 2.0),
        ])
        .unwrap();
        let mut classifier = ParticleClassifier::new(
            ClassifierConfig::new().with_visit_order(VisitOrder::Explicit(vec![0])),
        );
        let err = classifier.classify(&mut table).unwrap_err();
        assert!(matches!(err, Error::InvalidVisitOrder(_)));
        assert_eq!(table.label(0), Some(ParticleClass::Alpha));
    }

    #[test]
    fn test_matrices_exposed_after_run() {
        let mut table = CentroidTable::from_columns(&[900.0, 200.0], &[1000.0, 1800.0]).unwrap();
        let mut classifier = ParticleClassifier::default();
        assert!(classifier.relative_positions().is_empty());
        classifier.classify(&mut table).unwrap();
        assert_eq!(classifier.relative_positions().len(), 2);
        assert!((classifier.relative_positions().dx(0, 1) + 700.0).abs() < f64::EPSILON);
    }
}

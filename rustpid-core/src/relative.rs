//! Pairwise relative-position matrices.
//!
//! For a table of N centroids, `x[[i, j]] = xpos[j] - xpos[i]` and
//! `y[[i, j]] = ypos[j] - ypos[i]`. Both matrices are anti-symmetric with a
//! zero diagonal. Row `i` therefore describes where every other centroid sits
//! relative to centroid `i`: a negative entry means the other centroid lies
//! to the left (x) or below (y).

use crate::centroid::CentroidTable;
use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

/// Coordinate axis of a relative matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeAxis {
    X,
    Y,
}

/// Signed neighbor counts for one row of both matrices.
///
/// Zero entries (the diagonal and exact ties) count on neither side. NaN
/// entries count nowhere either.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowGeometry {
    /// Others with smaller x (to the left).
    pub neg_x: usize,
    /// Others with larger x (to the right).
    pub pos_x: usize,
    /// Others with smaller y (below).
    pub neg_y: usize,
    /// Others with larger y (above).
    pub pos_y: usize,
}

/// The Xrel / Yrel matrix pair for one table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelativePositions {
    x: Array2<f64>,
    y: Array2<f64>,
}

impl RelativePositions {
    /// Computes both matrices for `table`.
    #[must_use]
    pub fn compute(table: &CentroidTable) -> Self {
        let mut positions = Self::default();
        positions.rebuild(table);
        positions
    }

    /// Recomputes both matrices from scratch, reusing the allocation when
    /// the table size is unchanged.
    pub fn rebuild(&mut self, table: &CentroidTable) {
        let n = table.len();
        if self.x.dim() != (n, n) {
            self.x = Array2::zeros((n, n));
            self.y = Array2::zeros((n, n));
        }

        let rows = table.rows();
        for (i, origin) in rows.iter().enumerate() {
            for (j, other) in rows.iter().enumerate() {
                self.x[[i, j]] = other.x - origin.x;
                self.y[[i, j]] = other.y - origin.y;
            }
        }
    }

    /// Number of centroids the matrices were built for.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    /// Returns true before the first build.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// The Xrel matrix.
    #[must_use]
    pub fn x(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    /// The Yrel matrix.
    #[must_use]
    pub fn y(&self) -> ArrayView2<'_, f64> {
        self.y.view()
    }

    /// The matrix for `axis`.
    #[must_use]
    pub fn matrix(&self, axis: RelativeAxis) -> ArrayView2<'_, f64> {
        match axis {
            RelativeAxis::X => self.x(),
            RelativeAxis::Y => self.y(),
        }
    }

    /// Row `i` of the matrix for `axis`.
    #[must_use]
    pub fn row(&self, axis: RelativeAxis, i: usize) -> ArrayView1<'_, f64> {
        self.matrix(axis).index_axis_move(Axis(0), i)
    }

    /// Entry `(i, j)` of Xrel.
    #[must_use]
    pub fn dx(&self, i: usize, j: usize) -> f64 {
        self.x[[i, j]]
    }

    /// Entry `(i, j)` of Yrel.
    #[must_use]
    pub fn dy(&self, i: usize, j: usize) -> f64 {
        self.y[[i, j]]
    }

    /// Counts neighbors on each side of row `i`.
    #[must_use]
    pub fn row_geometry(&self, i: usize) -> RowGeometry {
        let (neg_x, pos_x) = signed_counts(self.row(RelativeAxis::X, i));
        let (neg_y, pos_y) = signed_counts(self.row(RelativeAxis::Y, i));
        RowGeometry {
            neg_x,
            pos_x,
            neg_y,
            pos_y,
        }
    }

    /// Largest entry of Xrel, i.e. the widest pairwise x-separation.
    ///
    /// NaN if any entry is NaN, so that comparisons against it fail.
    #[must_use]
    pub fn max_x_separation(&self) -> f64 {
        self.x.iter().fold(f64::NEG_INFINITY, |acc, &value| {
            if acc.is_nan() || value.is_nan() {
                f64::NAN
            } else {
                acc.max(value)
            }
        })
    }

    /// Number of entries in row `i` of Xrel equal to `value`.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn count_x_equal(&self, i: usize, value: f64) -> usize {
        self.row(RelativeAxis::X, i)
            .iter()
            .filter(|&&entry| entry == value)
            .count()
    }
}

fn signed_counts(row: ArrayView1<'_, f64>) -> (usize, usize) {
    row.iter().fold((0, 0), |(neg, pos), &value| {
        if value < 0.0 {
            (neg + 1, pos)
        } else if value > 0.0 {
            (neg, pos + 1)
        } else {
            (neg, pos)
        }
    })
}

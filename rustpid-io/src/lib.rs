//! rustpid-io: Centroid table input and output for rustpid.
//!
//! Tables are exchanged as CSV with `Xpos` / `Ypos` coordinate columns and a
//! `Particle Label` column, matching the layout of the upstream clustering
//! step. Labeled tables can also be written as JSON.
//!

mod error;
mod reader;
mod writer;

pub use error::{Error, Result};
pub use reader::{read_centroids, read_centroids_csv};
pub use writer::{LabeledTableWriter, OutputFormat};

/// Column holding centroid X positions.
pub const X_COLUMN: &str = "Xpos";
/// Column holding centroid Y positions.
pub const Y_COLUMN: &str = "Ypos";
/// Column holding particle labels.
pub const LABEL_COLUMN: &str = "Particle Label";

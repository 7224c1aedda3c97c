//! rustpid-core: Core types and classifier for geometric particle identification.
//!
//! This crate labels a small set of 2D cluster centroids with particle
//! classes (protons, alphas, tritons, deuterons) based only on how the
//! centroids sit relative to each other.
//!

pub mod centroid;
pub mod classifier;
pub mod config;
pub mod error;
pub mod particle;
pub mod relative;

pub use centroid::{Centroid, CentroidTable, LabelCounts};
pub use classifier::{classify_particles, ParticleClassifier};
pub use config::{ClassifierConfig, ReferenceMode, Thresholds, VisitOrder};
pub use error::{Error, Result};
pub use particle::ParticleClass;
pub use relative::{RelativeAxis, RelativePositions, RowGeometry};

//! Particle classes assigned to cluster centroids.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Closed set of particle classes.
///
/// Variants are declared in classification priority order: a row that
/// satisfies several rule sets receives the first one listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParticleClass {
    /// Lowest-right group, usually the furthest from the others.
    Proton,
    /// Highest group, usually in the upper-left corner.
    Alpha,
    /// Below the alphas, upper-left of the deuterons.
    Triton,
    /// Middle group between tritons and protons.
    Deuteron,
}

impl ParticleClass {
    /// All classes in priority order.
    pub const ALL: [ParticleClass; 4] = [
        ParticleClass::Proton,
        ParticleClass::Alpha,
        ParticleClass::Triton,
        ParticleClass::Deuteron,
    ];

    /// Label text written to the `Particle Label` column.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Proton => "Protons",
            Self::Alpha => "Alphas",
            Self::Triton => "Tritons",
            Self::Deuteron => "Deuterons",
        }
    }
}

impl fmt::Display for ParticleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for ParticleClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proton" | "protons" => Ok(Self::Proton),
            "alpha" | "alphas" => Ok(Self::Alpha),
            "triton" | "tritons" => Ok(Self::Triton),
            "deuteron" | "deuterons" => Ok(Self::Deuteron),
            _ => Err(Error::UnknownLabel(s.to_string())),
        }
    }
}

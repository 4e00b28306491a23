//! Error types for the simulation core.
//!
//! Every variant is fatal for the `simulate()` call that raised it. The core
//! never retries; the caller decides whether to abort, log or restart.

use biotope_data::OrganismId;
use thiserror::Error;

/// Main error type for biotope_core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// An extension with the same name is already registered
    #[error("Duplicate extension: {0}")]
    DuplicateExtension(String),

    /// A species lacks a trait an extension requires
    #[error("Missing organism property '{property}' for species {species}")]
    MissingOrganismProperty {
        species: String,
        property: &'static str,
    },

    /// Negative energy added to a vegetation cluster
    #[error("Cannot add negative amount of energy to cluster: {0}")]
    NegativeEnergy(f64),

    /// Pregnancy ran past the species' gestation length
    #[error("Organism {id} exceeded gestation: {elapsed} days elapsed of {breeding}")]
    GestationOverrun {
        id: OrganismId,
        elapsed: u32,
        breeding: u32,
    },

    /// A birth draw produced no known sex
    #[error("Unknown sex index during birth: {0}")]
    UnknownSex(usize),

    /// Entity store bookkeeping out of sync
    #[error("Consistency error: {0}")]
    Consistency(String),
}

/// Result type alias for biotope_core operations.
pub type Result<T> = std::result::Result<T, SimulationError>;

impl SimulationError {
    /// Creates a new consistency error.
    #[must_use]
    pub fn consistency<S: Into<String>>(msg: S) -> Self {
        Self::Consistency(msg.into())
    }

    /// Creates a new missing-property error.
    #[must_use]
    pub fn missing_property<S: Into<String>>(species: S, property: &'static str) -> Self {
        Self::MissingOrganismProperty {
            species: species.into(),
            property,
        }
    }

    /// Whether the error signals a configuration problem rather than a
    /// violated modeling invariant.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::DuplicateExtension(_)
                | Self::MissingOrganismProperty { .. }
                | Self::NegativeEnergy(_)
        )
    }
}

use super::distribution::{CenteredNormal, DEFAULT_STD_FACTOR};
use super::entity::{Entity, VegetationId};
use super::species::DayRange;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A homogeneous cluster of one plant species at one site, following an
/// annual life cycle: plants do not survive past their first growing season.
///
/// The cluster does not track individual plants. It keeps a count of mature
/// and immature plants and a pool of energy that foragers draw from.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnnualVegetationCluster {
    #[serde(flatten)]
    pub entity: Entity,
    /// Energy currently available to foragers.
    pub energy_amount: f64,
    /// Energy a single plant yields once it matures.
    pub crop_energy_yield: f64,
    pub maturity: CenteredNormal,
    pub mature_amount: u64,
    pub immature_amount: u64,
}

impl AnnualVegetationCluster {
    #[must_use]
    pub fn new(
        id: VegetationId,
        species: impl Into<String>,
        age: u32,
        amount: u64,
        energy_yield: f64,
        maturity_range: DayRange,
    ) -> Self {
        Self {
            entity: Entity::new(species, age, id),
            energy_amount: 0.0,
            crop_energy_yield: energy_yield,
            maturity: CenteredNormal::from_range(maturity_range, DEFAULT_STD_FACTOR),
            mature_amount: 0,
            immature_amount: amount,
        }
    }

    #[must_use]
    pub fn id(&self) -> VegetationId {
        self.entity.id
    }

    #[must_use]
    pub fn species(&self) -> &str {
        &self.entity.name
    }
}

impl fmt::Display for AnnualVegetationCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} #{} | {} mature | {} immature | {:.1} energy",
            self.entity.name, self.entity.id, self.mature_amount, self.immature_amount,
            self.energy_amount
        )
    }
}

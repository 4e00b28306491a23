use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A day range whose bounds are out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid day range [{min}, {max}]: min exceeds max")]
pub struct InvalidRange {
    pub min: u32,
    pub max: u32,
}

/// Inclusive range of days, serialized as `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u32; 2]", into = "[u32; 2]")]
pub struct DayRange {
    pub min: u32,
    pub max: u32,
}

impl DayRange {
    pub fn new(min: u32, max: u32) -> Result<Self, InvalidRange> {
        if min > max {
            return Err(InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.max - self.min
    }
}

impl TryFrom<[u32; 2]> for DayRange {
    type Error = InvalidRange;

    fn try_from(value: [u32; 2]) -> Result<Self, Self::Error> {
        Self::new(value[0], value[1])
    }
}

impl From<DayRange> for [u32; 2] {
    fn from(range: DayRange) -> Self {
        [range.min, range.max]
    }
}

/// Species traits consumed by the foraging model.
///
/// Every field is optional at load time; the foraging extension reports the
/// first one it needs and cannot find.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ForagingTraits {
    #[serde(default)]
    pub daily_energy_consumption: Option<f64>,
    #[serde(default)]
    pub energy_foraging_amount: Option<f64>,
    #[serde(default)]
    pub days_energy_stockpile_max: Option<u32>,
}

/// Properties of a species, shared by reference among its organisms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganismInfo {
    pub name: String,
    /// Days until sexual maturity.
    pub maturity: u32,
    /// Gestation length in days.
    pub breeding: u32,
    /// Typical natural-death window.
    pub lifespan: DayRange,
    /// Typical fertility cutoff window.
    pub menopause: DayRange,
    #[serde(default)]
    pub foraging: ForagingTraits,
}

/// Predator species mapped to the species they feed on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodChain {
    preys: BTreeMap<String, Vec<String>>,
}

impl FoodChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, predator: impl Into<String>, preys: Vec<String>) {
        self.preys.insert(predator.into(), preys);
    }

    /// Prey species of `predator`, if the chain mentions it.
    #[must_use]
    pub fn preys_of(&self, predator: &str) -> Option<&[String]> {
        self.preys.get(predator).map(Vec::as_slice)
    }

    pub fn predators(&self) -> impl Iterator<Item = &str> {
        self.preys.keys().map(String::as_str)
    }

    pub fn all_preys(&self) -> impl Iterator<Item = &str> {
        self.preys.values().flatten().map(String::as_str)
    }
}

use super::distribution::{CenteredNormal, DEFAULT_STD_FACTOR};
use super::entity::{Entity, OrganismId};
use super::species::OrganismInfo;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Biological sex of an organism, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    /// Number of sexes a newborn can be assigned.
    pub const BIRTH_SEXES: usize = 2;

    /// Maps a uniform draw in `0..BIRTH_SEXES` to a birth sex.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Male),
            1 => Some(Self::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        };
        f.write_str(label)
    }
}

/// A living (or dead) member of an animal species.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Organism {
    #[serde(flatten)]
    pub entity: Entity,
    pub sex: Sex,
    pub info: Arc<OrganismInfo>,
    /// Age at which the current pregnancy began.
    pub breeding_term: Option<u32>,
    pub fertile: bool,
    mortality: CenteredNormal,
    menopause_onset: CenteredNormal,
}

impl Organism {
    #[must_use]
    pub fn new(id: OrganismId, age: u32, sex: Sex, info: Arc<OrganismInfo>) -> Self {
        Self::with_std_factor(id, age, sex, info, DEFAULT_STD_FACTOR)
    }

    #[must_use]
    pub fn with_std_factor(
        id: OrganismId,
        age: u32,
        sex: Sex,
        info: Arc<OrganismInfo>,
        std_factor: f64,
    ) -> Self {
        Self {
            entity: Entity::new(info.name.clone(), age, id),
            sex,
            mortality: CenteredNormal::from_range(info.lifespan, std_factor),
            menopause_onset: CenteredNormal::from_range(info.menopause, std_factor),
            info,
            breeding_term: None,
            fertile: true,
        }
    }

    #[must_use]
    pub fn id(&self) -> OrganismId {
        self.entity.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.entity.name
    }

    #[must_use]
    pub fn age(&self) -> u32 {
        self.entity.age
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.entity.alive
    }

    #[must_use]
    pub fn is_mature(&self) -> bool {
        self.entity.age >= self.info.maturity
    }

    #[must_use]
    pub fn is_pregnant(&self) -> bool {
        self.breeding_term.is_some()
    }

    /// Days elapsed since fertilization, if pregnant.
    #[must_use]
    pub fn gestation_elapsed(&self) -> Option<u32> {
        self.breeding_term
            .map(|term| self.entity.age.saturating_sub(term))
    }

    #[must_use]
    pub fn mortality(&self) -> &CenteredNormal {
        &self.mortality
    }

    #[must_use]
    pub fn menopause_onset(&self) -> &CenteredNormal {
        &self.menopause_onset
    }
}

impl fmt::Display for Organism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} #{} ({}, {} days)",
            self.entity.name, self.entity.id, self.sex, self.entity.age
        )
    }
}

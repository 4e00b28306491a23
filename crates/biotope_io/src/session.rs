//! Session files describe the initial state of a simulation.
//!
//! ```json
//! {
//!   "species": [
//!     { "name": "Rabbit", "maturity": 120, "breeding": 30,
//!       "lifespan": [300, 400], "menopause": [250, 300],
//!       "foraging": { "daily-energy-consumption": 2.0,
//!                     "energy-foraging-amount": 1.0,
//!                     "days-energy-stockpile-max": 5 } }
//!   ],
//!   "organisms": [ { "name": "Rabbit", "age": 150, "sex": "female" } ],
//!   "vegetation": [ { "name": "Corn", "age": 0, "amount": 200,
//!                     "energy-yield": 5.0, "maturity": [60, 90] } ],
//!   "food-chain-preys": { "Rabbit": ["Corn"] }
//! }
//! ```

use crate::error::{IoError, Result};
use biotope_core::EntityStore;
use biotope_data::{AnnualVegetationCluster, DayRange, FoodChain, Organism, OrganismInfo, Sex};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganismRecord {
    pub name: String,
    pub age: u32,
    pub sex: Sex,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VegetationRecord {
    pub name: String,
    pub age: u32,
    pub amount: u64,
    pub energy_yield: f64,
    pub maturity: DayRange,
    /// Energy available before the first harvest.
    #[serde(default)]
    pub energy: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SessionFile {
    #[serde(default)]
    pub species: Vec<OrganismInfo>,
    #[serde(default)]
    pub organisms: Vec<OrganismRecord>,
    #[serde(default)]
    pub vegetation: Vec<VegetationRecord>,
    #[serde(default)]
    pub food_chain_preys: FoodChain,
}

impl SessionFile {
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Err(IoError::validation("Empty session file"));
        }
        Ok(serde_json::from_str(json)?)
    }

    /// Checks species and food-chain consistency before anything reaches the
    /// store.
    pub fn validate(&self) -> Result<()> {
        let mut species = HashSet::new();
        for info in &self.species {
            if !species.insert(info.name.as_str()) {
                return Err(IoError::validation(format!(
                    "Duplicate species info for {}",
                    info.name
                )));
            }
        }

        for record in &self.organisms {
            if !species.contains(record.name.as_str()) {
                return Err(IoError::validation(format!(
                    "Organism species {} has no species info",
                    record.name
                )));
            }
        }

        let mut plants = HashSet::new();
        for record in &self.vegetation {
            if record.energy_yield < 0.0 || record.energy < 0.0 {
                return Err(IoError::validation(format!(
                    "Vegetation {} has negative energy",
                    record.name
                )));
            }
            if species.contains(record.name.as_str()) {
                return Err(IoError::validation(format!(
                    "{} is declared both as an organism species and as vegetation",
                    record.name
                )));
            }
            plants.insert(record.name.as_str());
        }

        for predator in self.food_chain_preys.predators() {
            if plants.contains(predator) {
                return Err(IoError::validation(format!(
                    "Vegetation {predator} detected as predator in the food chain"
                )));
            }
            if !species.contains(predator) {
                return Err(IoError::validation(format!(
                    "Uninitialized organism {predator} detected in the food chain"
                )));
            }
        }
        for prey in self.food_chain_preys.all_preys() {
            if !species.contains(prey) && !plants.contains(prey) {
                return Err(IoError::validation(format!(
                    "Prey {prey} in the food chain has no organism or vegetation backing it"
                )));
            }
        }
        Ok(())
    }

    /// Validates the session and builds a store from it. Ids come from the
    /// store's own counters, in file order.
    pub fn populate(&self, std_factor: f64) -> Result<EntityStore> {
        self.validate()?;

        let infos: HashMap<&str, Arc<OrganismInfo>> = self
            .species
            .iter()
            .map(|info| (info.name.as_str(), Arc::new(info.clone())))
            .collect();

        let mut store = EntityStore::new();
        for record in &self.organisms {
            let info = infos.get(record.name.as_str()).ok_or_else(|| {
                IoError::validation(format!("Unknown species {}", record.name))
            })?;
            let id = store.reserve_organism_id();
            store.add_organism(Organism::with_std_factor(
                id,
                record.age,
                record.sex,
                Arc::clone(info),
                std_factor,
            ))?;
        }

        for record in &self.vegetation {
            let id = store.reserve_vegetation_id();
            let mut cluster = AnnualVegetationCluster::new(
                id,
                record.name.clone(),
                record.age,
                record.amount,
                record.energy_yield,
                record.maturity,
            );
            cluster.energy_amount = record.energy;
            store.add_vegetation(cluster);
        }

        store.set_food_chain(self.food_chain_preys.clone());
        tracing::info!(
            organisms = store.alive_count(),
            vegetation = store.vegetation_count(),
            species = self.species.len(),
            "Session loaded"
        );
        Ok(store)
    }
}

/// Reads, validates and loads a session file into a fresh store.
pub fn load_session(path: impl AsRef<Path>, std_factor: f64) -> Result<EntityStore> {
    let path = path.as_ref();
    let load = || -> Result<EntityStore> {
        let json = std::fs::read_to_string(path)?;
        SessionFile::from_json(&json)?.populate(std_factor)
    };
    load().map_err(|e| e.with_context(format!("loading {}", path.display())))
}

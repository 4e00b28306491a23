//! Resource-driven starvation.
//!
//! Each organism forages from one vegetation cluster at a time and keeps an
//! energy reserve. Patch choice follows the Ideal Free Distribution: the best
//! cluster is the one with the most energy left after every current forager
//! takes its daily share. Switching is gated by the Marginal Value Theorem in
//! its simplest form: an organism only reconsiders after a fixed number of
//! consecutive days at its current cluster.

use crate::config::ForagingConfig;
use crate::error::{Result, SimulationError};
use crate::extension::MortalityExtension;
use crate::store::EntityStore;
use crate::vegetation::ClusterLogic;
use biotope_data::{AnnualVegetationCluster, Organism, OrganismId, OrganismInfo, VegetationId};
use std::collections::HashMap;

pub const DAILY_ENERGY_CONSUMPTION: &str = "daily-energy-consumption";
pub const ENERGY_FORAGING_AMOUNT: &str = "energy-foraging-amount";
pub const DAYS_ENERGY_STOCKPILE_MAX: &str = "days-energy-stockpile-max";

/// Foraging traits of a species with every required field present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForagingNeeds {
    pub daily_consumption: f64,
    pub foraging_amount: f64,
    pub stockpile_days: u32,
}

impl ForagingNeeds {
    pub fn resolve(info: &OrganismInfo) -> Result<Self> {
        let traits = &info.foraging;
        let missing = |property| SimulationError::missing_property(&info.name, property);
        Ok(Self {
            daily_consumption: traits
                .daily_energy_consumption
                .ok_or_else(|| missing(DAILY_ENERGY_CONSUMPTION))?,
            foraging_amount: traits
                .energy_foraging_amount
                .ok_or_else(|| missing(ENERGY_FORAGING_AMOUNT))?,
            stockpile_days: traits
                .days_energy_stockpile_max
                .ok_or_else(|| missing(DAYS_ENERGY_STOCKPILE_MAX))?,
        })
    }

    /// Largest reserve an organism will build up.
    #[must_use]
    pub fn stockpile_cap(&self) -> f64 {
        f64::from(self.stockpile_days) * self.daily_consumption
    }
}

/// Where an organism forages and how much energy it has in reserve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForagerState {
    pub cluster: Option<VegetationId>,
    pub reserve: f64,
    pub days_at_cluster: u32,
}

pub struct ForagingExtension {
    name: String,
    residence_days: u32,
    foragers: HashMap<OrganismId, ForagerState>,
    populations: HashMap<VegetationId, usize>,
}

impl Default for ForagingExtension {
    fn default() -> Self {
        Self::new()
    }
}

impl ForagingExtension {
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("foraging")
    }

    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            residence_days: ForagingConfig::default().patch_residence_days,
            foragers: HashMap::new(),
            populations: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_residence_days(mut self, days: u32) -> Self {
        self.residence_days = days;
        self
    }

    #[must_use]
    pub fn state(&self, id: OrganismId) -> Option<&ForagerState> {
        self.foragers.get(&id)
    }

    /// Number of organisms currently foraging at `cluster`.
    #[must_use]
    pub fn cluster_population(&self, cluster: VegetationId) -> usize {
        self.populations.get(&cluster).copied().unwrap_or(0)
    }

    /// Ideal Free Distribution score: energy left at the cluster after every
    /// current forager takes `consumption`.
    #[must_use]
    pub fn quality(&self, cluster: &AnnualVegetationCluster, consumption: f64) -> f64 {
        cluster.energy_amount - consumption * self.cluster_population(cluster.id()) as f64
    }

    /// The highest-quality cluster `species` can feed on. Ties go to the
    /// first cluster in store order.
    ///
    /// The food chain only narrows the candidates when it names at least one
    /// plant species present in the store; otherwise every cluster counts.
    #[must_use]
    pub fn best_cluster(
        &self,
        store: &EntityStore,
        species: &str,
        consumption: f64,
    ) -> Option<VegetationId> {
        let diet = store.food_chain().preys_of(species).filter(|preys| {
            store
                .vegetation()
                .iter()
                .any(|cluster| preys.iter().any(|prey| prey == cluster.species()))
        });
        let mut best: Option<(VegetationId, f64)> = None;
        for cluster in store.vegetation() {
            if let Some(preys) = diet {
                if !preys.iter().any(|prey| prey == cluster.species()) {
                    continue;
                }
            }
            let quality = self.quality(cluster, consumption);
            if best.map_or(true, |(_, q)| quality > q) {
                best = Some((cluster.id(), quality));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Places a newly seen organism at the best cluster with an empty reserve.
    pub fn assign_by_ideal_free_distribution(
        &mut self,
        organism: &Organism,
        store: &EntityStore,
    ) -> Result<Option<VegetationId>> {
        let needs = ForagingNeeds::resolve(&organism.info)?;
        let cluster = self.best_cluster(store, organism.name(), needs.daily_consumption);
        self.foragers.insert(
            organism.id(),
            ForagerState {
                cluster: None,
                reserve: 0.0,
                days_at_cluster: 0,
            },
        );
        if let Some(cluster) = cluster {
            self.place(organism.id(), cluster);
        }
        Ok(cluster)
    }

    /// Moves an organism to `cluster`, keeping population counters in step.
    /// Unknown organisms start with an empty reserve.
    pub fn place(&mut self, id: OrganismId, cluster: VegetationId) {
        let state = self.foragers.entry(id).or_insert(ForagerState {
            cluster: None,
            reserve: 0.0,
            days_at_cluster: 0,
        });
        if state.cluster == Some(cluster) {
            return;
        }
        if let Some(previous) = state.cluster.replace(cluster) {
            if let Some(count) = self.populations.get_mut(&previous) {
                *count = count.saturating_sub(1);
            }
        }
        state.days_at_cluster = 0;
        *self.populations.entry(cluster).or_insert(0) += 1;
    }

    /// Counts another day at the current cluster. Returns the current cluster
    /// when the organism is due to reconsider it.
    fn tick_residence(&mut self, id: OrganismId) -> Option<Option<VegetationId>> {
        let state = self.foragers.get_mut(&id)?;
        state.days_at_cluster += 1;
        (state.days_at_cluster >= self.residence_days).then_some(state.cluster)
    }

    fn forage(&mut self, id: OrganismId, needs: ForagingNeeds, store: &mut EntityStore) {
        let Some(state) = self.foragers.get_mut(&id) else {
            return;
        };
        let Some(cluster) = state.cluster.and_then(|c| store.cluster_mut(c)) else {
            state.reserve = 0.0;
            return;
        };
        let top_up = needs
            .foraging_amount
            .min(needs.stockpile_cap() - state.reserve)
            .max(0.0);
        let foraged = cluster.forage_energy(needs.daily_consumption + top_up);
        state.reserve = (state.reserve + foraged - needs.daily_consumption).max(0.0);
    }
}

impl MortalityExtension for ForagingExtension {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_day(&mut self, store: &mut EntityStore) -> Result<()> {
        let ids = store.alive_ids().to_vec();
        for id in ids {
            let Some(organism) = store.organism(id) else {
                continue;
            };
            let needs = ForagingNeeds::resolve(&organism.info)?;

            if !self.foragers.contains_key(&id) {
                self.assign_by_ideal_free_distribution(organism, store)?;
            } else if let Some(current) = self.tick_residence(id) {
                let best = self.best_cluster(store, organism.name(), needs.daily_consumption);
                if let Some(best) = best.filter(|b| Some(*b) != current) {
                    tracing::trace!(organism = id, from = ?current, to = best, "Patch switch");
                    self.place(id, best);
                }
            }

            self.forage(id, needs, store);
        }
        Ok(())
    }

    fn should_die(
        &self,
        organism: &Organism,
        _store: &EntityStore,
        log: &mut Vec<String>,
    ) -> Result<bool> {
        let Some(state) = self.foragers.get(&organism.id()) else {
            return Ok(false);
        };
        if state.reserve > 0.0 {
            return Ok(false);
        }
        log.push(format!(
            "{} #{} starved at age {} days",
            organism.name(),
            organism.id(),
            organism.age()
        ));
        Ok(true)
    }

    fn notify_organism_death(&mut self, organism: &Organism) {
        if let Some(state) = self.foragers.remove(&organism.id()) {
            if let Some(count) = state.cluster.and_then(|c| self.populations.get_mut(&c)) {
                *count = count.saturating_sub(1);
            }
        }
    }
}

//! The daily pipeline.
//!
//! One call to [`Simulation::simulate`] runs one day, in strict order:
//!
//! 1. **Advance**: day counter, organism ages, vegetation growth, extension
//!    bookkeeping.
//! 2. **Mortality**: natural deaths, then extension predicates; the marked
//!    organisms are killed and every extension is notified.
//! 3. **Pairing**: vegetation repopulation on cycle boundaries, menopause,
//!    then mating.
//! 4. **Nativity**: pregnancies that reach term give birth.
//!
//! Any error aborts the day where it was raised. The simulation performs no
//! rollback; the caller decides what to do with a failed run.

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::extension::{ExtensionRegistry, MortalityExtension};
use crate::metrics::Metrics;
use crate::random::{ChaChaSource, RandomSource};
use crate::store::EntityStore;
use crate::systems::mortality::{self, NATURAL_CAUSES};
use crate::systems::reproduction::{self, PairingLimits};
use crate::vegetation::ClusterLogic;
use biotope_data::OrganismId;
use std::time::Instant;

/// Outcome of one simulated day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayReport {
    pub day: u32,
    /// Death and birth messages in the order they happened.
    pub log: Vec<String>,
    pub deaths: usize,
    pub births: usize,
    pub alive: usize,
    pub dead: usize,
}

pub struct Simulation {
    store: EntityStore,
    extensions: ExtensionRegistry,
    rng: Box<dyn RandomSource>,
    config: SimulationConfig,
    metrics: Metrics,
    day: u32,
}

impl Simulation {
    /// Builds an engine around a populated store. The random source is seeded
    /// from `config.world.seed` when set.
    #[must_use]
    pub fn new(store: EntityStore, config: SimulationConfig) -> Self {
        let rng = ChaChaSource::from_seed_option(config.world.seed);
        Self {
            store,
            extensions: ExtensionRegistry::new(),
            rng: Box::new(rng),
            config,
            metrics: Metrics::new(),
            day: 0,
        }
    }

    /// Replaces the random source, e.g. with a scripted one in tests.
    #[must_use]
    pub fn with_random_source(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    /// Adds a mortality extension. Names must be unique.
    pub fn register_mortality_extension(
        &mut self,
        extension: Box<dyn MortalityExtension>,
    ) -> Result<()> {
        self.extensions.register(extension)
    }

    pub fn extension_names(&self) -> impl Iterator<Item = &str> {
        self.extensions.names()
    }

    #[must_use]
    pub fn extension(&self, name: &str) -> Option<&dyn MortalityExtension> {
        self.extensions.get(name)
    }

    #[must_use]
    pub fn day(&self) -> u32 {
        self.day
    }

    #[must_use]
    pub fn organism_alive_count(&self) -> usize {
        self.store.alive_count()
    }

    #[must_use]
    pub fn organism_dead_count(&self) -> usize {
        self.store.dead_count()
    }

    #[must_use]
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Mutable access for loaders and tests between days.
    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Runs one full day of the pipeline.
    pub fn simulate(&mut self) -> Result<DayReport> {
        let start = Instant::now();
        let mut log = Vec::new();

        self.advance()?;
        let deaths = self.mortality(&mut log)?;
        self.pairing();
        let births = self.nativity(&mut log)?;

        debug_assert!(self.store.check_consistency().is_ok());

        let report = DayReport {
            day: self.day,
            log,
            deaths,
            births,
            alive: self.store.alive_count(),
            dead: self.store.dead_count(),
        };
        self.metrics.add_to_counter("births", births as u64);
        self.metrics.record_day(
            self.day,
            start.elapsed(),
            report.alive,
            report.dead,
            self.config.world.log_interval,
        );
        Ok(report)
    }

    /// Kills a live organism and notifies every extension. Returns `false` if
    /// `id` was not alive.
    pub fn kill(&mut self, id: OrganismId) -> bool {
        if !self.store.kill_organism(id) {
            return false;
        }
        if let Some(dead) = self.store.dead_organisms().last() {
            self.extensions.notify_organism_death(dead);
        }
        true
    }

    /// Kills up to `amount` randomly chosen organisms. Returns how many died.
    pub fn kill_amount(&mut self, amount: usize) -> usize {
        let count = amount.min(self.store.alive_count());
        for _ in 0..count {
            let index = self.rng.below(self.store.alive_count());
            let id = self.store.alive_ids()[index];
            self.kill(id);
        }
        if count > 0 {
            tracing::info!(requested = amount, culled = count, day = self.day, "Culled organisms");
            self.metrics.add_to_counter("culls", count as u64);
        }
        count
    }

    fn advance(&mut self) -> Result<()> {
        self.day += 1;
        for organism in self.store.organisms_mut() {
            organism.entity.age += 1;
        }
        for cluster in self.store.vegetation_mut() {
            cluster.next_day(self.rng.as_mut())?;
        }
        self.extensions.next_day(&mut self.store)
    }

    fn mortality(&mut self, log: &mut Vec<String>) -> Result<usize> {
        let deaths =
            mortality::select_deaths(&self.store, &self.extensions, self.rng.as_mut(), log)?;
        let mut killed = 0;
        for death in &deaths {
            if self.kill(death.id) {
                killed += 1;
                tracing::debug!(organism = death.id, cause = %death.cause, day = self.day, "Death");
                let counter = if death.cause == NATURAL_CAUSES {
                    "deaths.natural".to_string()
                } else {
                    format!("deaths.{}", death.cause)
                };
                self.metrics.increment_counter(&counter);
            }
        }
        Ok(killed)
    }

    fn pairing(&mut self) {
        let cycle_length = self.config.vegetation.cycle_length;
        for cluster in self.store.vegetation_mut() {
            if cluster.repopulate(self.day, cycle_length) {
                tracing::debug!(cluster = cluster.id(), day = self.day, "Vegetation repopulated");
            }
        }

        reproduction::apply_menopause(&mut self.store, self.rng.as_mut());
        if self.store.female_count() == 0 {
            return;
        }
        let limits = PairingLimits::from(&self.config.reproduction);
        let pregnancies = reproduction::pair(&mut self.store, self.rng.as_mut(), limits);
        if pregnancies > 0 {
            tracing::trace!(pregnancies, day = self.day, "Pairing");
        }
    }

    fn nativity(&mut self, log: &mut Vec<String>) -> Result<usize> {
        let born = reproduction::give_birth(
            &mut self.store,
            self.rng.as_mut(),
            self.config.world.std_factor,
            log,
        )?;
        for id in &born {
            tracing::debug!(organism = id, day = self.day, "Birth");
        }
        Ok(born.len())
    }
}

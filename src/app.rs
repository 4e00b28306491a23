//! Headless runner: session in, summary (and optionally a result file) out.

use anyhow::{Context, Result};
use biotope_core::{ForagingExtension, Simulation, SimulationConfig};
use biotope_io::{aggregate, persist, PopulationSummary, SimulationResults};
use std::path::{Path, PathBuf};

/// Everything a run needs besides the session contents.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub session: PathBuf,
    pub config: Option<PathBuf>,
    pub days: u32,
    /// Overrides `world.seed` from the config file.
    pub seed: Option<u64>,
    pub foraging: bool,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub days_run: u32,
    pub extinct: bool,
    pub summary: PopulationSummary,
}

pub struct App {
    pub simulation: Simulation,
}

impl App {
    pub fn from_options(options: &RunOptions) -> Result<Self> {
        let mut config = match &options.config {
            Some(path) => SimulationConfig::load(path)?,
            None => SimulationConfig::default(),
        };
        if options.seed.is_some() {
            config.world.seed = options.seed;
        }

        let store = biotope_io::load_session(&options.session, config.world.std_factor)?;
        let mut simulation = Simulation::new(store, config);
        if options.foraging {
            let residence = simulation.config().foraging.patch_residence_days;
            simulation.register_mortality_extension(Box::new(
                ForagingExtension::new().with_residence_days(residence),
            ))?;
        }
        Ok(Self { simulation })
    }

    /// Simulates up to `days` days, stopping early once no organism is left.
    pub fn run(&mut self, days: u32) -> Result<RunOutcome> {
        let mut days_run = 0;
        let mut extinct = self.simulation.organism_alive_count() == 0;
        while days_run < days && !extinct {
            let report = self
                .simulation
                .simulate()
                .with_context(|| format!("day {} failed", self.simulation.day() + 1))?;
            for line in &report.log {
                tracing::debug!(day = report.day, "{line}");
            }
            days_run += 1;
            extinct = report.alive == 0;
        }

        if extinct {
            tracing::warn!(day = self.simulation.day(), "All organisms are dead");
        }
        let metrics = self.simulation.metrics();
        tracing::info!(
            days = metrics.day_count(),
            alive = metrics.alive_count(),
            dead = metrics.dead_count(),
            elapsed_ms = metrics.elapsed().as_millis() as u64,
            "Run finished"
        );
        Ok(RunOutcome {
            days_run,
            extinct,
            summary: self.summary(),
        })
    }

    #[must_use]
    pub fn summary(&self) -> PopulationSummary {
        aggregate(self.simulation.store(), self.simulation.day())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let config = self.simulation.config();
        let results =
            SimulationResults::new(self.summary(), config.fingerprint(), config.world.seed);
        persist(&results, path).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

//! Pluggable mortality models.
//!
//! An extension keeps its own per-organism bookkeeping and joins the daily
//! pipeline through three hooks: `next_day` during the advance phase,
//! `should_die` during the mortality phase, and `notify_organism_death`
//! whenever the engine kills an organism for any reason.

use crate::error::{Result, SimulationError};
use crate::store::EntityStore;
use biotope_data::Organism;

pub trait MortalityExtension {
    /// Registration name, unique within a simulation.
    fn name(&self) -> &str;

    /// Per-day bookkeeping. Must not kill organisms.
    fn next_day(&mut self, store: &mut EntityStore) -> Result<()>;

    /// Whether `organism` should die today. May append a human-readable
    /// reason to `log`.
    fn should_die(
        &self,
        organism: &Organism,
        store: &EntityStore,
        log: &mut Vec<String>,
    ) -> Result<bool>;

    /// Releases any state held for an organism that just died.
    fn notify_organism_death(&mut self, organism: &Organism);
}

/// Registered extensions in registration order.
#[derive(Default)]
pub struct ExtensionRegistry {
    extensions: Vec<Box<dyn MortalityExtension>>,
}

impl ExtensionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, extension: Box<dyn MortalityExtension>) -> Result<()> {
        if self.get(extension.name()).is_some() {
            return Err(SimulationError::DuplicateExtension(
                extension.name().to_string(),
            ));
        }
        tracing::debug!(extension = extension.name(), "Registered mortality extension");
        self.extensions.push(extension);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn MortalityExtension> {
        self.extensions
            .iter()
            .find(|ext| ext.name() == name)
            .map(AsRef::as_ref)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(|ext| ext.name())
    }

    /// Runs every extension's `next_day` in registration order.
    pub fn next_day(&mut self, store: &mut EntityStore) -> Result<()> {
        for ext in &mut self.extensions {
            ext.next_day(store)?;
        }
        Ok(())
    }

    /// Asks each extension in turn; the first to answer `true` wins and its
    /// name is returned.
    pub fn cause_of_death(
        &self,
        organism: &Organism,
        store: &EntityStore,
        log: &mut Vec<String>,
    ) -> Result<Option<&str>> {
        for ext in &self.extensions {
            if ext.should_die(organism, store, log)? {
                return Ok(Some(ext.name()));
            }
        }
        Ok(None)
    }

    pub fn notify_organism_death(&mut self, organism: &Organism) {
        for ext in &mut self.extensions {
            ext.notify_organism_death(organism);
        }
    }
}

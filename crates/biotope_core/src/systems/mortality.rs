use crate::error::Result;
use crate::extension::ExtensionRegistry;
use crate::lifecycle;
use crate::random::RandomSource;
use crate::store::EntityStore;
use biotope_data::OrganismId;

/// Cause recorded for deaths drawn from the mortality distribution.
pub const NATURAL_CAUSES: &str = "natural";

/// An organism marked to die this day and what killed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Death {
    pub id: OrganismId,
    pub cause: String,
}

/// Decides who dies today without removing anyone.
///
/// Natural mortality is drawn first; extensions are only consulted for
/// organisms that survive it, in registration order, stopping at the first
/// that claims the organism.
pub fn select_deaths(
    store: &EntityStore,
    extensions: &ExtensionRegistry,
    rng: &mut dyn RandomSource,
    log: &mut Vec<String>,
) -> Result<Vec<Death>> {
    let mut deaths = Vec::new();
    for organism in store.organisms() {
        if lifecycle::should_die_naturally(organism, rng) {
            log.push(format!("{organism} died of natural causes"));
            deaths.push(Death {
                id: organism.id(),
                cause: NATURAL_CAUSES.to_string(),
            });
            continue;
        }
        if let Some(cause) = extensions.cause_of_death(organism, store, log)? {
            deaths.push(Death {
                id: organism.id(),
                cause: cause.to_string(),
            });
        }
    }
    Ok(deaths)
}

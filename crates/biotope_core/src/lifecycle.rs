//! Per-organism lifecycle predicates (death, fertility, gestation, birth).

use crate::error::{Result, SimulationError};
use crate::random::RandomSource;
use biotope_data::{Organism, OrganismId, Sex};
use std::sync::Arc;

/// Draws a uniform value and compares it against the mortality CDF at the
/// organism's age: near zero before the lifespan window, steep inside it.
pub fn should_die_naturally(organism: &Organism, rng: &mut dyn RandomSource) -> bool {
    rng.uniform() < organism.mortality().cdf(f64::from(organism.age()))
}

/// Same test as natural mortality, against the menopause-onset CDF.
pub fn reaches_menopause(organism: &Organism, rng: &mut dyn RandomSource) -> bool {
    rng.uniform() < organism.menopause_onset().cdf(f64::from(organism.age()))
}

/// A female can be impregnated when mature, fertile and not already pregnant.
pub fn is_eligible_mate(female: &Organism) -> bool {
    female.sex == Sex::Female && female.fertile && female.is_mature() && !female.is_pregnant()
}

/// Whether a pregnancy reaches term today.
///
/// Fails when gestation already ran past the species' breeding length, which
/// means a birth was skipped.
pub fn is_due(organism: &Organism) -> Result<bool> {
    let Some(elapsed) = organism.gestation_elapsed() else {
        return Ok(false);
    };
    let breeding = organism.info.breeding;
    if elapsed > breeding {
        return Err(SimulationError::GestationOverrun {
            id: organism.id(),
            elapsed,
            breeding,
        });
    }
    Ok(elapsed == breeding)
}

/// A newborn of the mother's species with a uniformly drawn birth sex.
pub fn newborn(
    id: OrganismId,
    mother: &Organism,
    rng: &mut dyn RandomSource,
    std_factor: f64,
) -> Result<Organism> {
    let index = rng.below(Sex::BIRTH_SEXES);
    let sex = Sex::from_index(index).ok_or(SimulationError::UnknownSex(index))?;
    Ok(Organism::with_std_factor(
        id,
        0,
        sex,
        Arc::clone(&mother.info),
        std_factor,
    ))
}

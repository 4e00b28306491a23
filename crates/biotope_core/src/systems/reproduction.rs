use crate::config::ReproductionConfig;
use crate::error::Result;
use crate::lifecycle;
use crate::random::RandomSource;
use crate::store::EntityStore;
use biotope_data::OrganismId;

/// Limits on a male's mating attempts within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairingLimits {
    /// Inclusive upper bound of the daily mate target.
    pub max_mates: u32,
    /// Consecutive failed picks before giving up.
    pub max_failed: u32,
}

impl From<&ReproductionConfig> for PairingLimits {
    fn from(config: &ReproductionConfig) -> Self {
        Self {
            max_mates: config.max_mates_per_day,
            max_failed: config.max_failed_pairings,
        }
    }
}

impl Default for PairingLimits {
    fn default() -> Self {
        Self::from(&ReproductionConfig::default())
    }
}

/// Flips fertile females past their menopause draw to permanently infertile.
/// Returns how many changed.
pub fn apply_menopause(store: &mut EntityStore, rng: &mut dyn RandomSource) -> usize {
    let mut changed = 0;
    for id in store.female_ids().to_vec() {
        let Some(female) = store.organism_mut(id) else {
            continue;
        };
        if female.fertile && lifecycle::reaches_menopause(female, rng) {
            female.fertile = false;
            changed += 1;
        }
    }
    changed
}

/// Pairs every mature male with randomly picked eligible females.
///
/// Each male draws a mate target in `0..=max_mates` and keeps picking
/// uniformly among all females until the target is met or `max_failed`
/// consecutive picks land on ineligible females. A successful pairing starts
/// the female's pregnancy at her current age, which also makes her
/// ineligible for the rest of the day. Returns the number of pregnancies.
pub fn pair(store: &mut EntityStore, rng: &mut dyn RandomSource, limits: PairingLimits) -> usize {
    if store.female_count() == 0 {
        return 0;
    }
    let males = store.male_ids().to_vec();
    let mut pregnancies = 0;

    for male in males {
        if !store.organism(male).is_some_and(|m| m.is_mature()) {
            continue;
        }
        let target = rng.inclusive(0, limits.max_mates);
        let mut mates = 0;
        let mut failures = 0;
        while mates < target && failures < limits.max_failed {
            let pick = store.female_ids()[rng.below(store.female_count())];
            match store.organism_mut(pick) {
                Some(female) if lifecycle::is_eligible_mate(female) => {
                    female.breeding_term = Some(female.age());
                    mates += 1;
                    failures = 0;
                    pregnancies += 1;
                }
                _ => failures += 1,
            }
        }
    }
    pregnancies
}

/// Delivers every pregnancy that reaches term today.
///
/// Newborns get the next reserved id, age zero, a uniformly drawn sex and
/// the mother's species info. Returns the ids of the newborns in birth order.
pub fn give_birth(
    store: &mut EntityStore,
    rng: &mut dyn RandomSource,
    std_factor: f64,
    log: &mut Vec<String>,
) -> Result<Vec<OrganismId>> {
    let mut born = Vec::new();
    for mother_id in store.female_ids().to_vec() {
        let Some(mother) = store.organism(mother_id) else {
            continue;
        };
        if !lifecycle::is_due(mother)? {
            continue;
        }

        let child_id = store.reserve_organism_id();
        let Some(mother) = store.organism_mut(mother_id) else {
            continue;
        };
        mother.breeding_term = None;
        let child = lifecycle::newborn(child_id, mother, rng, std_factor)?;
        log.push(format!("{child} was born to {mother}"));

        store.add_organism(child)?;
        born.push(child_id);
    }
    Ok(born)
}

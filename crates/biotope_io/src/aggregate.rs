use biotope_core::EntityStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-species head counts taken from a store at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationSummary {
    pub day: u32,
    pub alive_total: usize,
    pub dead_total: usize,
    pub organisms: BTreeMap<String, usize>,
    pub dead: BTreeMap<String, usize>,
    /// Mature plus immature plants per vegetation species.
    pub vegetation: BTreeMap<String, u64>,
}

impl PopulationSummary {
    #[must_use]
    pub fn is_extinct(&self) -> bool {
        self.alive_total == 0
    }
}

#[must_use]
pub fn aggregate(store: &EntityStore, day: u32) -> PopulationSummary {
    let mut summary = PopulationSummary {
        day,
        alive_total: store.alive_count(),
        dead_total: store.dead_count(),
        ..PopulationSummary::default()
    };

    for organism in store.organisms() {
        *summary
            .organisms
            .entry(organism.name().to_string())
            .or_default() += 1;
    }
    for organism in store.dead_organisms() {
        *summary.dead.entry(organism.name().to_string()).or_default() += 1;
    }
    for cluster in store.vegetation() {
        *summary
            .vegetation
            .entry(cluster.species().to_string())
            .or_default() += cluster.mature_amount + cluster.immature_amount;
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use biotope_data::{AnnualVegetationCluster, DayRange, Organism, OrganismInfo, Sex};
    use std::sync::Arc;

    fn info(name: &str) -> Arc<OrganismInfo> {
        Arc::new(OrganismInfo {
            name: name.to_string(),
            maturity: 10,
            breeding: 5,
            lifespan: DayRange::new(100, 200).unwrap(),
            menopause: DayRange::new(80, 90).unwrap(),
            foraging: Default::default(),
        })
    }

    #[test]
    fn test_aggregate_counts_by_species() {
        let mut store = EntityStore::new();
        let rabbit = info("Rabbit");
        let fox = info("Fox");
        for (species, sex) in [(&rabbit, Sex::Male), (&rabbit, Sex::Female), (&fox, Sex::Female)] {
            let id = store.reserve_organism_id();
            store
                .add_organism(Organism::new(id, 20, sex, Arc::clone(species)))
                .unwrap();
        }
        for _ in 0..2 {
            let id = store.reserve_vegetation_id();
            store.add_vegetation(AnnualVegetationCluster::new(
                id,
                "Corn",
                0,
                50,
                1.0,
                DayRange::new(10, 20).unwrap(),
            ));
        }
        assert!(store.kill_organism(3));

        let summary = aggregate(&store, 12);
        assert_eq!(summary.day, 12);
        assert_eq!(summary.alive_total, 2);
        assert_eq!(summary.dead_total, 1);
        assert_eq!(summary.organisms.get("Rabbit"), Some(&2));
        assert_eq!(summary.organisms.get("Fox"), None);
        assert_eq!(summary.dead.get("Fox"), Some(&1));
        assert_eq!(summary.vegetation.get("Corn"), Some(&100));
        assert!(!summary.is_extinct());
    }

    #[test]
    fn test_empty_store_is_extinct() {
        assert!(aggregate(&EntityStore::new(), 0).is_extinct());
    }
}

//! Ownership of every simulated entity.
//!
//! Live organisms sit in an arena keyed by id. Three index vectors (all
//! organisms, males, females) list the same ids, and `slots` records where
//! each live id sits in the general vector and in its sex vector. Removal
//! swaps the last id into the vacated position so every death is O(1); the
//! order of the index vectors carries no meaning.

use crate::error::{Result, SimulationError};
use biotope_data::{
    AnnualVegetationCluster, FoodChain, Organism, OrganismId, Sex, VegetationId,
};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    index: usize,
    sex_index: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct EntityStore {
    arena: HashMap<OrganismId, Organism>,
    organisms: Vec<OrganismId>,
    males: Vec<OrganismId>,
    females: Vec<OrganismId>,
    slots: HashMap<OrganismId, Slot>,
    dead: Vec<Organism>,
    vegetation: Vec<AnnualVegetationCluster>,
    food_chain: FoodChain,
    next_organism_id: OrganismId,
    next_vegetation_id: VegetationId,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            arena: HashMap::new(),
            organisms: Vec::new(),
            males: Vec::new(),
            females: Vec::new(),
            slots: HashMap::new(),
            dead: Vec::new(),
            vegetation: Vec::new(),
            food_chain: FoodChain::default(),
            next_organism_id: 1,
            next_vegetation_id: 1,
        }
    }

    /// Reserves an organism id that will never be handed out again.
    ///
    /// The counter saturates at `u64::MAX`; once there, adding an organism
    /// under the repeated id fails instead of overflowing.
    pub fn reserve_organism_id(&mut self) -> OrganismId {
        let id = self.next_organism_id;
        self.next_organism_id = id.saturating_add(1);
        id
    }

    /// Reserves a vegetation id that will never be handed out again.
    pub fn reserve_vegetation_id(&mut self) -> VegetationId {
        let id = self.next_vegetation_id;
        self.next_vegetation_id = id.saturating_add(1);
        id
    }

    /// Appends a live organism to the general list and its sex list.
    ///
    /// Fails if an organism with the same id is already alive. Ids supplied
    /// from outside the counter push the counter past them.
    pub fn add_organism(&mut self, organism: Organism) -> Result<()> {
        let id = organism.id();
        if self.arena.contains_key(&id) {
            return Err(SimulationError::consistency(format!(
                "organism {id} is already in the store"
            )));
        }
        self.next_organism_id = self.next_organism_id.max(id.saturating_add(1));

        let index = self.organisms.len();
        self.organisms.push(id);
        let sex_index = match organism.sex {
            Sex::Male => {
                self.males.push(id);
                Some(self.males.len() - 1)
            }
            Sex::Female => {
                self.females.push(id);
                Some(self.females.len() - 1)
            }
            Sex::Other => None,
        };
        self.slots.insert(id, Slot { index, sex_index });
        self.arena.insert(id, organism);
        Ok(())
    }

    /// Moves a live organism into the dead record.
    ///
    /// Returns `false` without touching anything when the store holds no live
    /// organisms or `id` is not alive.
    pub fn kill_organism(&mut self, id: OrganismId) -> bool {
        if self.organisms.is_empty() {
            return false;
        }
        let Some(slot) = self.slots.get(&id).copied() else {
            return false;
        };
        let Some(mut organism) = self.arena.remove(&id) else {
            return false;
        };

        if let Some(moved) = swap_out(&mut self.organisms, slot.index) {
            if let Some(moved_slot) = self.slots.get_mut(&moved) {
                moved_slot.index = slot.index;
            }
        }

        if let Some(sex_index) = slot.sex_index {
            let moved = match organism.sex {
                Sex::Male => swap_out(&mut self.males, sex_index),
                Sex::Female => swap_out(&mut self.females, sex_index),
                Sex::Other => None,
            };
            if let Some(moved) = moved {
                if let Some(moved_slot) = self.slots.get_mut(&moved) {
                    moved_slot.sex_index = Some(sex_index);
                }
            }
        }

        self.slots.remove(&id);
        organism.entity.alive = false;
        self.dead.push(organism);
        true
    }

    #[must_use]
    pub fn organism(&self, id: OrganismId) -> Option<&Organism> {
        self.arena.get(&id)
    }

    pub fn organism_mut(&mut self, id: OrganismId) -> Option<&mut Organism> {
        self.arena.get_mut(&id)
    }

    /// Live organisms in general-list order.
    pub fn organisms(&self) -> impl Iterator<Item = &Organism> {
        self.organisms.iter().filter_map(|id| self.arena.get(id))
    }

    /// Live organisms in no particular order.
    pub fn organisms_mut(&mut self) -> impl Iterator<Item = &mut Organism> {
        self.arena.values_mut()
    }

    #[must_use]
    pub fn alive_ids(&self) -> &[OrganismId] {
        &self.organisms
    }

    #[must_use]
    pub fn male_ids(&self) -> &[OrganismId] {
        &self.males
    }

    #[must_use]
    pub fn female_ids(&self) -> &[OrganismId] {
        &self.females
    }

    #[must_use]
    pub fn dead_organisms(&self) -> &[Organism] {
        &self.dead
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.organisms.len()
    }

    #[must_use]
    pub fn dead_count(&self) -> usize {
        self.dead.len()
    }

    #[must_use]
    pub fn male_count(&self) -> usize {
        self.males.len()
    }

    #[must_use]
    pub fn female_count(&self) -> usize {
        self.females.len()
    }

    /// Appends a vegetation cluster. Ids supplied from outside the counter
    /// push the counter past them.
    pub fn add_vegetation(&mut self, cluster: AnnualVegetationCluster) {
        self.next_vegetation_id = self
            .next_vegetation_id
            .max(cluster.id().saturating_add(1));
        self.vegetation.push(cluster);
    }

    #[must_use]
    pub fn vegetation(&self) -> &[AnnualVegetationCluster] {
        &self.vegetation
    }

    pub fn vegetation_mut(&mut self) -> &mut [AnnualVegetationCluster] {
        &mut self.vegetation
    }

    #[must_use]
    pub fn cluster(&self, id: VegetationId) -> Option<&AnnualVegetationCluster> {
        self.vegetation.iter().find(|c| c.id() == id)
    }

    pub fn cluster_mut(&mut self, id: VegetationId) -> Option<&mut AnnualVegetationCluster> {
        self.vegetation.iter_mut().find(|c| c.id() == id)
    }

    #[must_use]
    pub fn vegetation_count(&self) -> usize {
        self.vegetation.len()
    }

    #[must_use]
    pub fn food_chain(&self) -> &FoodChain {
        &self.food_chain
    }

    pub fn set_food_chain(&mut self, food_chain: FoodChain) {
        self.food_chain = food_chain;
    }

    /// Verifies that every recorded slot matches the actual positions in the
    /// index vectors and that sex lists agree with each organism's sex.
    pub fn check_consistency(&self) -> Result<()> {
        if self.arena.len() != self.organisms.len() || self.slots.len() != self.organisms.len() {
            return Err(SimulationError::consistency(format!(
                "{} organisms, {} arena entries, {} slots",
                self.organisms.len(),
                self.arena.len(),
                self.slots.len()
            )));
        }

        for (index, id) in self.organisms.iter().enumerate() {
            let slot = self.slots.get(id).ok_or_else(|| {
                SimulationError::consistency(format!("organism {id} has no slot"))
            })?;
            if slot.index != index {
                return Err(SimulationError::consistency(format!(
                    "organism {id} recorded at {} but found at {index}",
                    slot.index
                )));
            }
            let organism = self.arena.get(id).ok_or_else(|| {
                SimulationError::consistency(format!("organism {id} missing from arena"))
            })?;
            if organism.sex == Sex::Other && slot.sex_index.is_some() {
                return Err(SimulationError::consistency(format!(
                    "organism {id} of sex other has a sex index"
                )));
            }
        }

        for (list, sex) in [(&self.males, Sex::Male), (&self.females, Sex::Female)] {
            for (sex_index, id) in list.iter().enumerate() {
                let matches = self.slots.get(id).map(|s| s.sex_index) == Some(Some(sex_index))
                    && self.arena.get(id).map(|o| o.sex) == Some(sex);
                if !matches {
                    return Err(SimulationError::consistency(format!(
                        "organism {id} misplaced in {sex} list at {sex_index}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Removes `list[index]` by moving the last element into its place and
/// returns the id that moved, if any.
fn swap_out(list: &mut Vec<OrganismId>, index: usize) -> Option<OrganismId> {
    if index >= list.len() {
        return None;
    }
    list.swap_remove(index);
    list.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ChaChaSource, RandomSource};
    use biotope_data::{DayRange, OrganismInfo};
    use std::sync::Arc;

    fn info() -> Arc<OrganismInfo> {
        Arc::new(OrganismInfo {
            name: "Rat".to_string(),
            maturity: 30,
            breeding: 20,
            lifespan: DayRange::new(300, 400).unwrap(),
            menopause: DayRange::new(250, 280).unwrap(),
            foraging: Default::default(),
        })
    }

    fn spawn(store: &mut EntityStore, sex: Sex) -> OrganismId {
        let id = store.reserve_organism_id();
        store
            .add_organism(Organism::new(id, 0, sex, info()))
            .unwrap();
        id
    }

    #[test]
    fn test_external_max_id_does_not_overflow() {
        let mut store = EntityStore::new();
        store
            .add_organism(Organism::new(u64::MAX, 0, Sex::Female, info()))
            .unwrap();
        store.add_vegetation(AnnualVegetationCluster::new(
            u64::MAX,
            "Grass",
            0,
            10,
            1.0,
            DayRange::new(10, 20).unwrap(),
        ));
        store.check_consistency().unwrap();

        let id = store.reserve_organism_id();
        assert_eq!(id, u64::MAX);
        assert_eq!(store.reserve_organism_id(), u64::MAX);
        assert_eq!(store.reserve_vegetation_id(), u64::MAX);
        assert!(matches!(
            store.add_organism(Organism::new(id, 0, Sex::Male, info())),
            Err(SimulationError::Consistency(_))
        ));
        assert_eq!(store.alive_count(), 1);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut store = EntityStore::new();
        let a = store.reserve_organism_id();
        let b = store.reserve_organism_id();
        let v = store.reserve_vegetation_id();
        assert_eq!((a, b, v), (1, 2, 1));
        store.kill_organism(a);
        assert_eq!(store.reserve_organism_id(), 3);
    }

    #[test]
    fn test_add_partitions_by_sex() {
        let mut store = EntityStore::new();
        let m = spawn(&mut store, Sex::Male);
        let f = spawn(&mut store, Sex::Female);
        let o = spawn(&mut store, Sex::Other);
        assert_eq!(store.alive_count(), 3);
        assert_eq!(store.male_ids(), &[m]);
        assert_eq!(store.female_ids(), &[f]);
        assert!(store.organism(o).is_some());
        store.check_consistency().unwrap();
    }

    #[test]
    fn test_duplicate_add_rejected() {
        let mut store = EntityStore::new();
        let id = spawn(&mut store, Sex::Male);
        let err = store
            .add_organism(Organism::new(id, 0, Sex::Male, info()))
            .unwrap_err();
        assert!(matches!(err, SimulationError::Consistency(_)));
    }

    #[test]
    fn test_external_id_advances_counter() {
        let mut store = EntityStore::new();
        store
            .add_organism(Organism::new(10, 0, Sex::Male, info()))
            .unwrap();
        assert_eq!(store.reserve_organism_id(), 11);
    }

    #[test]
    fn test_kill_only_organism() {
        let mut store = EntityStore::new();
        let id = spawn(&mut store, Sex::Female);
        assert!(store.kill_organism(id));
        assert_eq!(store.alive_count(), 0);
        assert_eq!(store.female_count(), 0);
        assert_eq!(store.dead_count(), 1);
        assert!(!store.dead_organisms()[0].is_alive());
        store.check_consistency().unwrap();
    }

    #[test]
    fn test_kill_on_empty_store_is_noop() {
        let mut store = EntityStore::new();
        assert!(!store.kill_organism(1));
        assert_eq!(store.dead_count(), 0);
    }

    #[test]
    fn test_kill_twice_is_noop() {
        let mut store = EntityStore::new();
        let a = spawn(&mut store, Sex::Male);
        spawn(&mut store, Sex::Male);
        assert!(store.kill_organism(a));
        assert!(!store.kill_organism(a));
        assert_eq!(store.dead_count(), 1);
    }

    #[test]
    fn test_swap_with_last_updates_moved_slot() {
        let mut store = EntityStore::new();
        let first = spawn(&mut store, Sex::Male);
        let _middle = spawn(&mut store, Sex::Female);
        let last = spawn(&mut store, Sex::Male);

        store.kill_organism(first);
        assert_eq!(store.alive_ids()[0], last);
        assert_eq!(store.male_ids(), &[last]);
        store.check_consistency().unwrap();
    }

    #[test]
    fn test_random_churn_stays_consistent() {
        let mut rng = ChaChaSource::seeded(2024);
        let mut store = EntityStore::new();
        let sexes = [Sex::Male, Sex::Female, Sex::Other];

        for _ in 0..2000 {
            if store.alive_count() == 0 || rng.uniform() < 0.55 {
                spawn(&mut store, sexes[rng.below(3)]);
            } else {
                let victim = store.alive_ids()[rng.below(store.alive_count())];
                assert!(store.kill_organism(victim));
            }
            store.check_consistency().unwrap();
        }
        assert_eq!(
            store.alive_count() + store.dead_count(),
            store.reserve_organism_id() as usize - 1
        );
    }

    #[test]
    fn test_add_vegetation_advances_counter() {
        let mut store = EntityStore::new();
        let range = DayRange::new(10, 20).unwrap();
        store.add_vegetation(AnnualVegetationCluster::new(4, "Corn", 0, 10, 5.0, range));
        assert_eq!(store.vegetation_count(), 1);
        assert_eq!(store.reserve_vegetation_id(), 5);
        assert!(store.cluster(4).is_some());
    }
}

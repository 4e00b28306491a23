use biotope_core::EntityStore;
use biotope_data::{DayRange, Organism, OrganismInfo, Sex};
use proptest::prelude::*;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Op {
    Add(Sex),
    Kill(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        prop_oneof![Just(Sex::Male), Just(Sex::Female), Just(Sex::Other)].prop_map(Op::Add),
        (0usize..64).prop_map(Op::Kill),
    ]
}

fn info() -> Arc<OrganismInfo> {
    Arc::new(OrganismInfo {
        name: "Ant".to_string(),
        maturity: 5,
        breeding: 2,
        lifespan: DayRange::new(50, 60).unwrap(),
        menopause: DayRange::new(40, 45).unwrap(),
        foraging: Default::default(),
    })
}

proptest! {
    #[test]
    fn store_stays_consistent(ops in prop::collection::vec(arb_op(), 1..200)) {
        let info = info();
        let mut store = EntityStore::new();
        let mut alive: Vec<(u64, Sex)> = Vec::new();
        let mut killed = 0;

        for op in ops {
            match op {
                Op::Add(sex) => {
                    let id = store.reserve_organism_id();
                    store.add_organism(Organism::new(id, 0, sex, Arc::clone(&info))).unwrap();
                    alive.push((id, sex));
                }
                Op::Kill(pick) => {
                    if alive.is_empty() {
                        prop_assert!(!store.kill_organism(pick as u64 + 1_000));
                        continue;
                    }
                    let (id, _) = alive.swap_remove(pick % alive.len());
                    prop_assert!(store.kill_organism(id));
                    prop_assert!(!store.kill_organism(id));
                    prop_assert!(store.organism(id).is_none());
                    killed += 1;
                }
            }

            prop_assert!(store.check_consistency().is_ok());
            prop_assert_eq!(store.alive_count(), alive.len());
            prop_assert_eq!(store.dead_count(), killed);
            let males = alive.iter().filter(|(_, s)| *s == Sex::Male).count();
            let females = alive.iter().filter(|(_, s)| *s == Sex::Female).count();
            prop_assert_eq!(store.male_count(), males);
            prop_assert_eq!(store.female_count(), females);
        }
    }

    #[test]
    fn reserved_ids_are_never_reused(adds in 1usize..100, kills in 0usize..100) {
        let info = info();
        let mut store = EntityStore::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..adds {
            let id = store.reserve_organism_id();
            prop_assert!(seen.insert(id));
            store.add_organism(Organism::new(id, 0, Sex::Female, Arc::clone(&info))).unwrap();
        }
        for id in 1..=kills.min(adds) as u64 {
            store.kill_organism(id);
        }
        let id = store.reserve_organism_id();
        prop_assert!(seen.insert(id));
    }
}

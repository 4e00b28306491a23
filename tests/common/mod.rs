pub mod macros;

use biotope_core::{ForagingExtension, RandomSource, Simulation, SimulationConfig};
use biotope_core::EntityStore;
use biotope_data::{
    AnnualVegetationCluster, DayRange, FoodChain, ForagingTraits, Organism, OrganismInfo, Sex,
};
use std::collections::HashMap;
use std::sync::Arc;

#[allow(dead_code)]
pub fn species(name: &str, maturity: u32, breeding: u32, lifespan: [u32; 2]) -> OrganismInfo {
    OrganismInfo {
        name: name.to_string(),
        maturity,
        breeding,
        lifespan: DayRange::new(lifespan[0], lifespan[1]).unwrap(),
        menopause: DayRange::new(5000, 6000).unwrap(),
        foraging: ForagingTraits::default(),
    }
}

#[allow(dead_code)]
pub fn forager(name: &str, consumption: f64, foraging_amount: f64, stockpile_days: u32) -> OrganismInfo {
    let mut info = species(name, 100, 20, [3000, 4000]);
    info.foraging = ForagingTraits {
        daily_energy_consumption: Some(consumption),
        energy_foraging_amount: Some(foraging_amount),
        days_energy_stockpile_max: Some(stockpile_days),
    };
    info
}

#[allow(dead_code)]
pub struct SimulationBuilder {
    config: SimulationConfig,
    species: HashMap<String, Arc<OrganismInfo>>,
    organisms: Vec<(String, u32, Sex)>,
    clusters: Vec<AnnualVegetationCluster>,
    food_chain: FoodChain,
    foraging: bool,
    rng: Option<Box<dyn RandomSource>>,
}

#[allow(dead_code)]
impl SimulationBuilder {
    pub fn new() -> Self {
        Self {
            config: SimulationConfig::default(),
            species: HashMap::new(),
            organisms: Vec::new(),
            clusters: Vec::new(),
            food_chain: FoodChain::new(),
            foraging: false,
            rng: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut SimulationConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_species(mut self, info: OrganismInfo) -> Self {
        self.species.insert(info.name.clone(), Arc::new(info));
        self
    }

    pub fn with_organism(mut self, species: &str, age: u32, sex: Sex) -> Self {
        self.organisms.push((species.to_string(), age, sex));
        self
    }

    pub fn with_organisms(mut self, species: &str, age: u32, sex: Sex, count: usize) -> Self {
        for _ in 0..count {
            self.organisms.push((species.to_string(), age, sex));
        }
        self
    }

    /// Adds a cluster whose ids follow insertion order, starting at 1.
    pub fn with_cluster(mut self, species: &str, amount: u64, maturity: [u32; 2], energy: f64) -> Self {
        let id = self.clusters.len() as u64 + 1;
        let mut cluster = AnnualVegetationCluster::new(
            id,
            species,
            0,
            amount,
            1.0,
            DayRange::new(maturity[0], maturity[1]).unwrap(),
        );
        cluster.energy_amount = energy;
        self.clusters.push(cluster);
        self
    }

    pub fn with_food_chain(mut self, predator: &str, preys: &[&str]) -> Self {
        self.food_chain
            .insert(predator, preys.iter().map(|p| p.to_string()).collect());
        self
    }

    pub fn with_foraging(mut self) -> Self {
        self.foraging = true;
        self
    }

    pub fn with_random_source(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    pub fn build_store(&self) -> EntityStore {
        let mut store = EntityStore::new();
        for (name, age, sex) in &self.organisms {
            let info = self.species.get(name).expect("species registered");
            let id = store.reserve_organism_id();
            store
                .add_organism(Organism::with_std_factor(
                    id,
                    *age,
                    *sex,
                    Arc::clone(info),
                    self.config.world.std_factor,
                ))
                .unwrap();
        }
        for cluster in &self.clusters {
            let id = store.reserve_vegetation_id();
            assert_eq!(id, cluster.id());
            store.add_vegetation(cluster.clone());
        }
        store.set_food_chain(self.food_chain.clone());
        store
    }

    pub fn build(self) -> Simulation {
        let store = self.build_store();
        let residence = self.config.foraging.patch_residence_days;
        let mut sim = Simulation::new(store, self.config);
        if let Some(rng) = self.rng {
            sim = sim.with_random_source(rng);
        }
        if self.foraging {
            sim.register_mortality_extension(Box::new(
                ForagingExtension::new().with_residence_days(residence),
            ))
            .unwrap();
        }
        sim
    }
}

//! # Biotope Core
//!
//! The simulation engine for Biotope, a discrete-time ecosystem model in which
//! organisms and vegetation clusters age, die, forage, mate and give birth
//! over successive simulated days.
//!
//! This crate contains:
//! - The entity store with stable ids and O(1) removal
//! - Vegetation growth cycles
//! - The daily pipeline (advance, mortality, pairing, nativity)
//! - The mortality extension interface and the foraging extension
//! - Configuration, metrics and structured logging
//!
//! ## Example
//!
//! ```
//! use biotope_core::{EntityStore, Simulation, SimulationConfig};
//! use biotope_data::{DayRange, Organism, OrganismInfo, Sex};
//! use std::sync::Arc;
//!
//! let info = Arc::new(OrganismInfo {
//!     name: "Rabbit".to_string(),
//!     maturity: 120,
//!     breeding: 30,
//!     lifespan: DayRange::new(300, 400).unwrap(),
//!     menopause: DayRange::new(250, 300).unwrap(),
//!     foraging: Default::default(),
//! });
//!
//! let mut store = EntityStore::new();
//! let id = store.reserve_organism_id();
//! store.add_organism(Organism::new(id, 0, Sex::Female, info)).unwrap();
//!
//! let mut config = SimulationConfig::default();
//! config.world.seed = Some(42);
//! let mut sim = Simulation::new(store, config);
//! let report = sim.simulate().unwrap();
//! assert_eq!(report.day, 1);
//! ```

/// Configuration management for simulation parameters
pub mod config;
/// Error types
pub mod error;
/// Mortality extension interface
pub mod extension;
/// Ideal Free Distribution foraging and starvation
pub mod foraging;
/// Per-organism lifecycle predicates
pub mod lifecycle;
/// Metrics collection and logging
pub mod metrics;
/// Injectable random source
pub mod random;
/// The daily pipeline
pub mod simulation;
/// Entity ownership and bookkeeping
pub mod store;
/// Whole-store phases (mortality, reproduction)
pub mod systems;
/// Vegetation growth cycle
pub mod vegetation;

pub use config::SimulationConfig;
pub use error::{Result, SimulationError};
pub use extension::{ExtensionRegistry, MortalityExtension};
pub use foraging::ForagingExtension;
pub use metrics::{init_logging, Metrics};
pub use random::{ChaChaSource, RandomSource, ScriptedSource};
pub use simulation::{DayReport, Simulation};
pub use store::EntityStore;
pub use vegetation::ClusterLogic;

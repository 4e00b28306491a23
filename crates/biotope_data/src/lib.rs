//! # Biotope Data
//!
//! Plain data records shared by every Biotope crate: organisms, species
//! information, vegetation clusters and the food chain. Behavior lives in
//! `biotope_core`, which extends these records through logic traits.

pub mod data;

pub use data::distribution::CenteredNormal;
pub use data::entity::{Entity, OrganismId, VegetationId};
pub use data::organism::{Organism, Sex};
pub use data::species::{DayRange, FoodChain, ForagingTraits, InvalidRange, OrganismInfo};
pub use data::vegetation::AnnualVegetationCluster;

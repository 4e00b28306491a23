//! Core data structures for the Biotope simulation.

pub mod distribution;
pub mod entity;
pub mod organism;
pub mod species;
pub mod vegetation;

//! Biotope: a discrete-time ecosystem simulation.
//!
//! The engine lives in `biotope_core`, the entity records in `biotope_data`
//! and session/result files in `biotope_io`. This crate wires them into a
//! headless runner.

pub mod app;

pub use biotope_core;
pub use biotope_data;
pub use biotope_io;

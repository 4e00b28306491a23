//! Phases of the daily pipeline that operate on the whole store.

pub mod mortality;
pub mod reproduction;

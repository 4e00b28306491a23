//! # Biotope IO
//!
//! Boundary collaborators of the simulation core:
//! - Session file loading and validation
//! - Population aggregation over a finished (or paused) store
//! - Result persistence as JSON, optionally gzip-compressed

/// Population summaries per species
pub mod aggregate;
/// Error types and result aliases for I/O operations
pub mod error;
/// Result files
pub mod persist;
/// Session file format and loader
pub mod session;

pub use aggregate::{aggregate, PopulationSummary};
pub use error::{IoError, Result};
pub use persist::{persist, read_results, SimulationResults};
pub use session::{load_session, SessionFile};

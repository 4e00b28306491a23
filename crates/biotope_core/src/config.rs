//! Configuration management for simulation parameters.
//!
//! Strongly-typed configuration structures that map to a `config.toml` file.
//! Every field has a default, so an empty file (or no file at all) yields the
//! standard daily pipeline.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! seed = 42
//! log_interval = 30
//!
//! [reproduction]
//! max_mates_per_day = 6
//! max_failed_pairings = 7
//!
//! [vegetation]
//! cycle_length = 365
//!
//! [foraging]
//! patch_residence_days = 5
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// World-level simulation configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for the random source. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Emit an info-level summary every this many days.
    pub log_interval: u32,
    /// Inverse scaling of a range width into a standard deviation.
    pub std_factor: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_interval: 30,
            std_factor: 4.0,
        }
    }
}

/// Mating parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ReproductionConfig {
    /// Inclusive upper bound of a male's daily mate target.
    pub max_mates_per_day: u32,
    /// Consecutive failed female picks before a male gives up for the day.
    pub max_failed_pairings: u32,
}

impl Default for ReproductionConfig {
    fn default() -> Self {
        Self {
            max_mates_per_day: 6,
            max_failed_pairings: 7,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct VegetationConfig {
    /// Days between cluster repopulations.
    pub cycle_length: u32,
}

impl Default for VegetationConfig {
    fn default() -> Self {
        Self { cycle_length: 365 }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ForagingConfig {
    /// Days an organism stays at a cluster before reconsidering it.
    pub patch_residence_days: u32,
}

impl Default for ForagingConfig {
    fn default() -> Self {
        Self {
            patch_residence_days: 5,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub world: WorldConfig,
    pub reproduction: ReproductionConfig,
    pub vegetation: VegetationConfig,
    pub foraging: ForagingConfig,
}

impl SimulationConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a
    /// description of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.world.log_interval > 0,
            "Log interval must be positive"
        );
        anyhow::ensure!(
            self.world.std_factor > 0.0 && self.world.std_factor.is_finite(),
            "Standard deviation factor must be a positive number"
        );
        anyhow::ensure!(
            self.reproduction.max_failed_pairings > 0,
            "Max failed pairings must be positive"
        );
        anyhow::ensure!(
            self.reproduction.max_mates_per_day <= 1000,
            "Max mates per day too large (max 1000)"
        );
        anyhow::ensure!(
            self.vegetation.cycle_length > 0,
            "Vegetation cycle length must be positive"
        );
        anyhow::ensure!(
            self.foraging.patch_residence_days > 0,
            "Patch residence days must be positive"
        );
        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates configuration from a file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
        Self::from_toml(&content)
    }

    /// Stable digest of the parameters that influence simulation outcomes.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world.std_factor).as_bytes());
        hasher.update(format!("{:?}", self.reproduction).as_bytes());
        hasher.update(format!("{:?}", self.vegetation).as_bytes());
        hasher.update(format!("{:?}", self.foraging).as_bytes());
        hex::encode(hasher.finalize())
    }
}

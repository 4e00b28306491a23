//! Growth cycle of annual vegetation clusters.

use crate::error::{Result, SimulationError};
use crate::random::RandomSource;
use biotope_data::AnnualVegetationCluster;

/// Daily behavior of a vegetation cluster.
pub trait ClusterLogic {
    /// Ages the cluster by a day and matures part of its immature plants.
    /// Returns how many plants matured.
    fn next_day(&mut self, rng: &mut dyn RandomSource) -> Result<u64>;

    /// Starts a new growth cycle when `day` falls on a cycle boundary.
    /// Returns whether the cluster was reset.
    fn repopulate(&mut self, day: u32, cycle_length: u32) -> bool;

    /// Removes at most `amount` energy and returns what was actually removed.
    fn forage_energy(&mut self, amount: f64) -> f64;

    fn add_energy(&mut self, amount: f64) -> Result<()>;

    /// `(species, mature + immature)`.
    fn population(&self) -> (&str, u64);
}

impl ClusterLogic for AnnualVegetationCluster {
    fn next_day(&mut self, rng: &mut dyn RandomSource) -> Result<u64> {
        self.entity.age += 1;

        // Probability that an individual has matured by the cluster's age,
        // applied to every still-immature plant.
        let p = self.maturity.cdf(f64::from(self.entity.age));
        let matured = rng.binomial(self.immature_amount, p);

        self.immature_amount -= matured;
        self.mature_amount += matured;
        self.add_energy(matured as f64 * self.crop_energy_yield)?;
        Ok(matured)
    }

    fn repopulate(&mut self, day: u32, cycle_length: u32) -> bool {
        if cycle_length == 0 || day % cycle_length != 0 {
            return false;
        }
        // Last season's adults seed the next season and do not persist.
        self.immature_amount = self.mature_amount;
        self.mature_amount = 0;
        self.entity.age = 0;
        true
    }

    fn forage_energy(&mut self, amount: f64) -> f64 {
        let foraged = amount.max(0.0).min(self.energy_amount);
        self.energy_amount -= foraged;
        foraged
    }

    fn add_energy(&mut self, amount: f64) -> Result<()> {
        if amount < 0.0 || amount.is_nan() {
            return Err(SimulationError::NegativeEnergy(amount));
        }
        self.energy_amount += amount;
        Ok(())
    }

    fn population(&self) -> (&str, u64) {
        (
            &self.entity.name,
            self.mature_amount + self.immature_amount,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ChaChaSource, ScriptedSource};
    use biotope_data::DayRange;

    fn cluster(age: u32, amount: u64, maturity: (u32, u32)) -> AnnualVegetationCluster {
        let range = DayRange::new(maturity.0, maturity.1).unwrap();
        AnnualVegetationCluster::new(1, "Corn", age, amount, 10.0, range)
    }

    #[test]
    fn test_matures_fully_past_range() {
        let mut rng = ChaChaSource::seeded(3);
        let mut corn = cluster(100, 100, (10, 20));
        let matured = corn.next_day(&mut rng).unwrap();
        assert_eq!(matured, 100);
        assert_eq!(corn.mature_amount, 100);
        assert_eq!(corn.immature_amount, 0);
        assert_eq!(corn.energy_amount, 1000.0);
        assert_eq!(corn.entity.age, 101);
    }

    #[test]
    fn test_nothing_matures_before_range() {
        let mut rng = ScriptedSource::constant(0.5);
        let mut corn = cluster(0, 50, (200, 240));
        assert_eq!(corn.next_day(&mut rng).unwrap(), 0);
        assert_eq!(corn.immature_amount, 50);
        assert_eq!(corn.energy_amount, 0.0);
    }

    #[test]
    fn test_population_is_conserved_while_maturing() {
        let mut rng = ChaChaSource::seeded(11);
        let mut corn = cluster(0, 500, (5, 25));
        for _ in 0..40 {
            corn.next_day(&mut rng).unwrap();
            assert_eq!(corn.population(), ("Corn", 500));
        }
        assert_eq!(corn.mature_amount, 500);
    }

    #[test]
    fn test_repopulate_only_on_cycle_boundary() {
        let mut corn = cluster(30, 0, (10, 20));
        corn.mature_amount = 40;
        corn.immature_amount = 5;

        assert!(!corn.repopulate(364, 365));
        assert_eq!(corn.mature_amount, 40);

        assert!(corn.repopulate(365, 365));
        assert_eq!(corn.immature_amount, 40);
        assert_eq!(corn.mature_amount, 0);
        assert_eq!(corn.entity.age, 0);
    }

    #[test]
    fn test_forage_clamps_to_available() {
        let mut corn = cluster(0, 0, (10, 20));
        corn.add_energy(30.0).unwrap();
        assert_eq!(corn.forage_energy(20.0), 20.0);
        assert_eq!(corn.forage_energy(20.0), 10.0);
        assert_eq!(corn.forage_energy(5.0), 0.0);
        assert_eq!(corn.energy_amount, 0.0);
    }

    #[test]
    fn test_negative_energy_rejected() {
        let mut corn = cluster(0, 0, (10, 20));
        assert_eq!(
            corn.add_energy(-1.0),
            Err(SimulationError::NegativeEnergy(-1.0))
        );
        assert_eq!(corn.energy_amount, 0.0);
    }
}

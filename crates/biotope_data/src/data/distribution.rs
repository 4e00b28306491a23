use super::species::DayRange;
use serde::{Deserialize, Serialize};

/// Default inverse scaling of a range width into a standard deviation.
pub const DEFAULT_STD_FACTOR: f64 = 4.0;

/// A Gaussian centered on the midpoint of a day range.
///
/// The standard deviation is the range width divided by a factor (4.0 unless
/// configured otherwise), so roughly 95% of the mass falls inside the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenteredNormal {
    pub mean: f64,
    pub std_dev: f64,
}

impl CenteredNormal {
    #[must_use]
    pub fn from_range(range: DayRange, std_factor: f64) -> Self {
        let width = f64::from(range.width());
        Self {
            mean: f64::from(range.min) + width / 2.0,
            std_dev: width / std_factor,
        }
    }

    /// Probability that a sample is less than or equal to `x`.
    ///
    /// A zero-width distribution behaves as a step at the mean.
    #[must_use]
    pub fn cdf(&self, x: f64) -> f64 {
        if self.std_dev <= 0.0 {
            return if x >= self.mean { 1.0 } else { 0.0 };
        }
        let z = (x - self.mean) / (self.std_dev * std::f64::consts::SQRT_2);
        (0.5 * (1.0 + erf(z))).clamp(0.0, 1.0)
    }
}

/// Abramowitz & Stegun 7.1.26, absolute error below 1.5e-7.
fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254_829_592;
    const A2: f64 = -0.284_496_736;
    const A3: f64 = 1.421_413_741;
    const A4: f64 = -1.453_152_027;
    const A5: f64 = 1.061_405_429;
    const P: f64 = 0.327_591_1;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min: u32, max: u32) -> DayRange {
        DayRange::new(min, max).unwrap()
    }

    #[test]
    fn test_centered_on_midpoint() {
        let dist = CenteredNormal::from_range(range(300, 400), DEFAULT_STD_FACTOR);
        assert_eq!(dist.mean, 350.0);
        assert_eq!(dist.std_dev, 25.0);
        assert!((dist.cdf(350.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_cdf_tails() {
        let dist = CenteredNormal::from_range(range(300, 400), DEFAULT_STD_FACTOR);
        assert!(dist.cdf(200.0) < 1e-4);
        assert!(dist.cdf(500.0) > 1.0 - 1e-4);
        // One standard deviation below the mean.
        assert!((dist.cdf(325.0) - 0.158_655).abs() < 1e-4);
    }

    #[test]
    fn test_zero_width_is_step() {
        let dist = CenteredNormal::from_range(range(10, 10), DEFAULT_STD_FACTOR);
        assert_eq!(dist.cdf(9.0), 0.0);
        assert_eq!(dist.cdf(10.0), 1.0);
    }
}

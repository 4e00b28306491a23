//! The single injectable random source behind every stochastic draw.
//!
//! The engine owns one `RandomSource` and lends it to the vegetation model and
//! the mortality/reproduction systems. Tests substitute a [`ScriptedSource`]
//! to force specific branches, or a seeded [`ChaChaSource`] for statistical
//! checks.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Binomial, Distribution};

/// Below this variance the binomial is sampled exactly by inversion; above it
/// the normal approximation is used.
const NORMAL_APPROXIMATION_VARIANCE: f64 = 9.0;

pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Uniform index in `0..n`. `n` must be positive.
    fn below(&mut self, n: usize) -> usize {
        ((self.uniform() * n as f64) as usize).min(n.saturating_sub(1))
    }

    /// Uniform integer in `lo..=hi`.
    fn inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        lo + self.below((hi - lo) as usize + 1) as u32
    }

    /// Number of successes in `trials` independent trials of probability `p`.
    ///
    /// Costs a bounded number of uniform draws regardless of `trials`.
    fn binomial(&mut self, trials: u64, p: f64) -> u64 {
        if p <= 0.0 || trials == 0 {
            return 0;
        }
        if p >= 1.0 {
            return trials;
        }
        if p > 0.5 {
            return trials - self.binomial(trials, 1.0 - p);
        }

        let n = trials as f64;
        let variance = n * p * (1.0 - p);
        if variance < NORMAL_APPROXIMATION_VARIANCE {
            // Inversion: walk the pmf until it covers one uniform draw.
            // With p <= 0.5 the mean stays small, so the walk is short.
            let ratio = p / (1.0 - p);
            let mut pmf = (1.0 - p).powf(n);
            let mut cdf = pmf;
            let u = self.uniform();
            let mut k = 0;
            while u > cdf && k < trials {
                pmf *= ratio * (trials - k) as f64 / (k + 1) as f64;
                k += 1;
                cdf += pmf;
            }
            return k;
        }

        // Box-Muller; `1 - u` keeps the logarithm finite.
        let radius = (-2.0 * (1.0 - self.uniform()).ln()).sqrt();
        let z = radius * (std::f64::consts::TAU * self.uniform()).cos();
        (n * p + z * variance.sqrt()).round().clamp(0.0, n) as u64
    }
}

/// Production random source backed by ChaCha8.
#[derive(Debug, Clone)]
pub struct ChaChaSource {
    rng: ChaCha8Rng,
}

impl ChaChaSource {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Seeded when `seed` is present, entropy otherwise.
    #[must_use]
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl RandomSource for ChaChaSource {
    fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn below(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }

    fn inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        self.rng.gen_range(lo..=hi)
    }

    fn binomial(&mut self, trials: u64, p: f64) -> u64 {
        if p <= 0.0 || trials == 0 {
            return 0;
        }
        if p >= 1.0 {
            return trials;
        }
        match Binomial::new(trials, p) {
            Ok(dist) => dist.sample(&mut self.rng),
            Err(_) => 0,
        }
    }
}

/// Replays a fixed sequence of uniform values, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// An empty script behaves as a constant `0.0`.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of uniforms drawn so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn uniform(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

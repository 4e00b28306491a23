//! Metrics collection and structured logging for the simulation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Running statistics of a simulation.
pub struct Metrics {
    day_count: AtomicU64,
    alive_count: AtomicU64,
    dead_count: AtomicU64,
    counters: Mutex<HashMap<String, u64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            day_count: AtomicU64::new(0),
            alive_count: AtomicU64::new(0),
            dead_count: AtomicU64::new(0),
            counters: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records a completed day with its duration.
    ///
    /// Logs an info-level summary every `log_interval` days.
    pub fn record_day(
        &self,
        day: u32,
        duration: Duration,
        alive: usize,
        dead: usize,
        log_interval: u32,
    ) {
        self.day_count.store(u64::from(day), Ordering::Relaxed);
        self.alive_count.store(alive as u64, Ordering::Relaxed);
        self.dead_count.store(dead as u64, Ordering::Relaxed);

        if log_interval > 0 && day % log_interval == 0 {
            tracing::info!(
                day = day,
                alive = alive,
                dead = dead,
                duration_us = duration.as_micros() as u64,
                "Simulation day"
            );
        }
    }

    /// Increments a named counter.
    pub fn increment_counter(&self, name: &str) {
        self.add_to_counter(name, 1);
    }

    pub fn add_to_counter(&self, name: &str, amount: u64) {
        if amount == 0 {
            return;
        }
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        *counters.entry(name.to_string()).or_insert(0) += amount;
    }

    /// Current value of a named counter, zero if never incremented.
    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters.get(name).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn day_count(&self) -> u64 {
        self.day_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn alive_count(&self) -> u64 {
        self.alive_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn dead_count(&self) -> u64 {
        self.dead_count.load(Ordering::Relaxed)
    }

    /// Gets elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging.
pub fn init_logging(level: tracing::Level) {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(level)
            .finish(),
    )
    .ok();
}

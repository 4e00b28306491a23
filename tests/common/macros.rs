/// Asserts that the store's index lists agree with its arena.
#[macro_export]
macro_rules! assert_consistent {
    ($sim:expr) => {
        if let Err(e) = $sim.store().check_consistency() {
            panic!("store inconsistent on day {}: {}", $sim.day(), e);
        }
    };
}

/// Asserts that the live population matches the expected value.
#[macro_export]
macro_rules! assert_population {
    ($sim:expr, $count:expr) => {
        assert_eq!(
            $sim.organism_alive_count(),
            $count,
            "Population count mismatch on day {}",
            $sim.day()
        );
    };
}

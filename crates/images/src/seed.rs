//! Injectable randomness for image request seeds.
//!
//! Each image request carries a fresh seed so two runs with the same
//! prompt do not collide on a cached deterministic result. The source
//! is a trait so tests can pin seeds.

use rand::Rng;

/// Inclusive bounds for image request seeds.
pub const SEED_MIN: u64 = 1;
pub const SEED_MAX: u64 = 999_999;

/// Source of per-request image seeds.
pub trait SeedSource: Send + Sync {
    /// Next seed, uniform in `SEED_MIN..=SEED_MAX`.
    fn next_seed(&self) -> u64;
}

/// Default source backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSeeds;

impl SeedSource for ThreadRngSeeds {
    fn next_seed(&self) -> u64 {
        rand::rng().random_range(SEED_MIN..=SEED_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_rng_seeds_stay_in_range() {
        let source = ThreadRngSeeds;
        for _ in 0..1000 {
            let seed = source.next_seed();
            assert!((SEED_MIN..=SEED_MAX).contains(&seed), "seed {seed} out of range");
        }
    }
}

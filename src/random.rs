use rand::Rng;

const MULTIPLIER_A: i64 = 1103515245;
const INCREMENT_C: i64 = 12345;
const DEFAULT_SEED: i64 = 3819201;

/// Source of leaf values for generated trees.
pub trait RandomGenerator: Default {
    fn next(&mut self) -> i32;

    /// Draws from the half-open range `[from, to)`. An empty range yields `from`.
    fn next_range(&mut self, from: i32, to: i32) -> i32;
}

/// Thread-local RNG from `rand`; every tree it seeds is different.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRandomGenerator;

impl RandomGenerator for StandardRandomGenerator {
    fn next(&mut self) -> i32 {
        rand::random()
    }

    fn next_range(&mut self, from: i32, to: i32) -> i32 {
        if to <= from {
            return from;
        }
        rand::rng().random_range(from..to)
    }
}

/// Seeded linear congruential generator, for reproducible trees.
#[derive(Debug, Clone)]
pub struct CustomNumberGenerator {
    seed: i64,
}

impl Default for CustomNumberGenerator {
    fn default() -> Self {
        CustomNumberGenerator::new(DEFAULT_SEED)
    }
}

impl RandomGenerator for CustomNumberGenerator {
    fn next(&mut self) -> i32 {
        self.seed = (self.seed * MULTIPLIER_A + INCREMENT_C) % (i32::MAX as i64);
        self.seed as i32
    }

    fn next_range(&mut self, from: i32, to: i32) -> i32 {
        if to <= from {
            return from;
        }
        let span = i64::from(to) - i64::from(from);
        (i64::from(self.next()).rem_euclid(span) + i64::from(from)) as i32
    }
}

impl CustomNumberGenerator {
    pub const fn new(seed: i64) -> Self {
        Self {
            seed: seed.rem_euclid(i32::MAX as i64),
        }
    }
}

use std::collections::VecDeque;
use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform integer source used for spawning and food placement.
pub trait RandomSource {
    /// Uniform value in the half-open `range`. The range must not be empty.
    fn random_range(&mut self, range: Range<usize>) -> usize;
}

pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SessionRng {
    fn random_range(&mut self, range: Range<usize>) -> usize {
        self.rng.random_range(range)
    }
}

/// Replays a fixed list of draws, each reduced into the requested range.
/// Once the script runs out every draw returns the low end of the range.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    values: VecDeque<usize>,
}

impl ScriptedRng {
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedRng {
    fn random_range(&mut self, range: Range<usize>) -> usize {
        assert!(!range.is_empty(), "random_range called with empty range {:?}", range);
        let span = range.end - range.start;
        let value = self.values.pop_front().unwrap_or(0);
        range.start + value % span
    }
}

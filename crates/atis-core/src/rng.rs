//! Seeded RNG for one run.
//!
//! A run owns exactly one `SimRng`, seeded from `SimConfig::seed`.  Draws
//! happen inside the single-threaded event loop in a fixed order:
//!
//! 1. every departure time, while the builder seeds the queue;
//! 2. per creation event, the actor's base route then its ATIS flag.
//!
//! The same seed and parameters therefore reproduce the same run.  Replicates
//! each build their own `SimRng` from their own seed.

use rand::distributions::{Distribution, Standard};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// One value from any `rand`/`rand_distr` distribution, e.g. a demand
    /// peak's `Normal` or a route `WeightedIndex`.
    #[inline]
    pub fn draw<T, D: Distribution<T>>(&mut self, dist: &D) -> T {
        dist.sample(&mut self.0)
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        Standard: Distribution<T>,
    {
        self.0.r#gen()
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform pick; `None` for an empty slice.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.0)
    }
}

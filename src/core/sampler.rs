// Copyright @yucwang 2026

use crate::math::constants::{ Float, Point2f };
use rand::{ Rng, SeedableRng };
use rand_xoshiro::Xoshiro256Plus;

/// Stream of independent uniform numbers in `[0, 1)`. One instance per
/// in-flight path; never shared between concurrent `li` calls.
pub trait Sampler: Send {
    fn next_1d(&mut self) -> Float;
    fn next_2d(&mut self) -> Point2f;

    /// Independent stream for another worker.
    fn clone_seeded(&self, seed: u64) -> Box<dyn Sampler>;
}

pub struct IndependentSampler {
    rng: Xoshiro256Plus,
}

impl IndependentSampler {
    pub fn new(seed: u64) -> Self {
        Self { rng: Xoshiro256Plus::seed_from_u64(seed) }
    }
}

impl Default for IndependentSampler {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Sampler for IndependentSampler {
    fn next_1d(&mut self) -> Float {
        self.rng.gen()
    }

    fn next_2d(&mut self) -> Point2f {
        Point2f::new(self.rng.gen(), self.rng.gen())
    }

    fn clone_seeded(&self, seed: u64) -> Box<dyn Sampler> {
        Box::new(IndependentSampler::new(seed))
    }
}

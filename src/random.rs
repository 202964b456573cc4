//! Seedable random source shared by every stochastic component.
//!
//! [`EvoRng`] wraps a [`StdRng`] and adds a one-slot cache for the second
//! value produced by the Box–Muller transform, so consecutive Gaussian draws
//! consume uniform samples in pairs. One generator is owned by each solver
//! and threaded by `&mut` into selection, recombination and mutation; nothing
//! in the crate reads ambient randomness.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::f64::consts::PI;

/// Creates a generator from a fixed seed.
///
/// Two generators created with the same seed produce identical sequences of
/// uniform and Gaussian draws.
pub fn create_rng(seed: u64) -> EvoRng {
    EvoRng::seed_from_u64(seed)
}

/// Random number generator with a cached Box–Muller spare.
#[derive(Debug, Clone)]
pub struct EvoRng {
    inner: StdRng,
    spare_gaussian: Option<f64>,
}

impl EvoRng {
    /// Wraps an existing [`StdRng`].
    pub fn new(inner: StdRng) -> Self {
        Self {
            inner,
            spare_gaussian: None,
        }
    }

    /// Draws a standard normal sample, N(0, 1).
    ///
    /// Uses the trigonometric Box–Muller transform. Every second call returns the
    /// cached companion value without touching the underlying generator.
    pub fn gaussian(&mut self) -> f64 {
        if let Some(spare) = self.spare_gaussian.take() {
            return spare;
        }

        // u1 in (0, 1] so ln(u1) is finite
        let u1 = 1.0 - self.inner.random::<f64>();
        let u2 = self.inner.random::<f64>();
        let radius = (-2.0 * u1.ln()).sqrt();
        let angle = 2.0 * PI * u2;

        self.spare_gaussian = Some(radius * angle.sin());
        radius * angle.cos()
    }

    /// Draws a normal sample with the given mean and standard deviation.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * self.gaussian()
    }

    /// Returns `true` with probability `p`, clamped into `[0, 1]`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.inner.random_bool(p.clamp(0.0, 1.0))
    }
}

impl SeedableRng for EvoRng {
    type Seed = <StdRng as SeedableRng>::Seed;

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(StdRng::from_seed(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(StdRng::seed_from_u64(state))
    }
}

impl RngCore for EvoRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.inner.fill_bytes(dst)
    }
}

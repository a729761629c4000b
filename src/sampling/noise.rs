//! Injectable randomness
//!
//! Every random draw in the crate goes through [`NoiseSource`], so tests and
//! reproducible runs can pin the draws instead of reaching for a global RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws in `[0, 1)`
pub trait NoiseSource: Send + Sync {
    /// Next uniform draw
    fn next_unit(&mut self) -> f64;

    /// Next draw scaled to `[0, span)`
    fn next_scaled(&mut self, span: f64) -> f64 {
        self.next_unit() * span
    }

    /// Next draw centred on zero, in `[-span / 2, span / 2)`
    fn next_centered(&mut self, span: f64) -> f64 {
        (self.next_unit() - 0.5) * span
    }
}

impl<T: NoiseSource + ?Sized> NoiseSource for Box<T> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Noise backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct RngNoise<R> {
    rng: R,
}

impl<R: Rng> RngNoise<R> {
    /// Wrap an existing generator
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngNoise<StdRng> {
    /// Generator seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Deterministic generator for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send + Sync> NoiseSource for RngNoise<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Always returns the same draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedNoise(f64);

impl FixedNoise {
    /// Create a fixed draw, clamped into `[0, 1]`
    pub fn new(unit: f64) -> Self {
        Self(unit.clamp(0.0, 1.0))
    }

    /// A source that never adds noise
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// A source whose centred draws are exactly zero
    pub fn midpoint() -> Self {
        Self(0.5)
    }
}

impl NoiseSource for FixedNoise {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// Replays a fixed list of draws, cycling when exhausted
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedNoise {
    draws: Vec<f64>,
    next: usize,
}

impl ScriptedNoise {
    /// Create from draws; each is clamped into `[0, 1]`. An empty list yields zeros.
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().map(|d| d.clamp(0.0, 1.0)).collect(),
            next: 0,
        }
    }
}

impl NoiseSource for ScriptedNoise {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let draw = self.draws[self.next % self.draws.len()];
        self.next = self.next.wrapping_add(1);
        draw
    }
}

//! The injectable survival-roll seam.
//!
//! The rollover engine never calls a global random source. It takes a
//! `&mut dyn SurvivalRoll`, so plan and apply can share one deterministic
//! roll for identical previews, and tests pin the outcome.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Decides whether a far-haven trail survives a season boundary.
pub trait SurvivalRoll {
    /// Roll against a survival chance in `[0, 1]`.
    fn passes(&mut self, chance: f64) -> bool;
}

/// Survival roll backed by a random number generator.
pub struct RngRoll<R: Rng> {
    rng: R,
}

impl RngRoll<StdRng> {
    /// Roll seeded from OS entropy (production).
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Roll with a fixed seed (reproducible plans and fixtures).
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RngRoll<R> {
    /// Wrap an arbitrary generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SurvivalRoll for RngRoll<R> {
    fn passes(&mut self, chance: f64) -> bool {
        self.rng.gen::<f64>() < chance
    }
}

/// Roll with a pinned outcome, for tests and what-if previews.
#[derive(Debug, Clone, Copy)]
pub struct FixedRoll(pub bool);

impl SurvivalRoll for FixedRoll {
    fn passes(&mut self, _chance: f64) -> bool {
        self.0
    }
}

//! Deterministic simulation RNG resource and uniform draws.
//!
//! Wraps `ChaCha8Rng` for cross-platform deterministic randomness. The
//! generators never reach for `rand::thread_rng()`: they take the random source
//! as an explicit `&mut R` so that a fixed seed reproduces a series exactly.

use bevy::prelude::*;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::DEFAULT_SEED;
use crate::error::SimError;

/// 2^-53, maps the top 53 bits of a `u64` onto `[0, 1)`.
const UNIT_SCALE: f64 = 1.0 / (1u64 << 53) as f64;

// ---------------------------------------------------------------------------
// Draws
// ---------------------------------------------------------------------------

/// Draw a uniform value in `[0, 1)`.
///
/// Goes through `try_fill_bytes` so a failing source surfaces as
/// [`SimError::ComputationUnavailable`] instead of a panic.
pub fn unit_draw<R: RngCore + ?Sized>(rng: &mut R) -> Result<f64, SimError> {
    let mut buf = [0u8; 8];
    rng.try_fill_bytes(&mut buf)?;
    let bits = u64::from_le_bytes(buf) >> 11;
    Ok(bits as f64 * UNIT_SCALE)
}

/// Draw a uniform value in `[low, high)`.
pub fn uniform<R: RngCore + ?Sized>(rng: &mut R, low: f64, high: f64) -> Result<f64, SimError> {
    Ok(unit_draw(rng)? * (high - low) + low)
}

/// Draw a uniform value in `[-spread, spread)`.
pub fn symmetric<R: RngCore + ?Sized>(rng: &mut R, spread: f64) -> Result<f64, SimError> {
    uniform(rng, -spread, spread)
}

// ---------------------------------------------------------------------------
// SimRng resource
// ---------------------------------------------------------------------------

/// Deterministic RNG resource shared by the analysis systems.
///
/// Systems that need randomness take `ResMut<SimRng>` and pass `&mut rng.0`
/// into the generators.
#[derive(Resource)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(DEFAULT_SEED))
    }
}

impl SimRng {
    /// Create a new `SimRng` seeded from the given `u64` value.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Restart the stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.0 = ChaCha8Rng::seed_from_u64(seed);
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// Inserts `SimRng` seeded from [`crate::analysis_params::AnalysisParams`] when
/// present, or from [`DEFAULT_SEED`] otherwise. An `SimRng` inserted by the
/// caller beforehand is left alone.
pub struct SimRngPlugin;

impl Plugin for SimRngPlugin {
    fn build(&self, app: &mut App) {
        if app.world().contains_resource::<SimRng>() {
            return;
        }
        let seed = app
            .world()
            .get_resource::<crate::analysis_params::AnalysisParams>()
            .map(|p| p.seed)
            .unwrap_or(DEFAULT_SEED);
        debug!("SimRng seeded with {}", seed);
        app.insert_resource(SimRng::from_seed_u64(seed));
    }
}

/// A source that always fails, standing in for an exhausted entropy pool.
#[cfg(test)]
pub(crate) struct ExhaustedRng;

#[cfg(test)]
impl RngCore for ExhaustedRng {
    fn next_u32(&mut self) -> u32 {
        0
    }
    fn next_u64(&mut self) -> u64 {
        0
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }
    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "exhausted",
        )))
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

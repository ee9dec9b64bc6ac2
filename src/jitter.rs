use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    core::{PointId, Vec2},
    error::{PolymarkError, PolymarkResult},
};

/// Upper bound on `multiplier`: creation jitter plus tick jitter must stay
/// under half the lattice spacing so neighbors never swap or overlap.
pub const MAX_JITTER_MULTIPLIER: f64 = 0.25;

/// Tick reserved for jitter baked into the lattice at creation.
pub(crate) const CREATION_TICK: u64 = 0;

/// Random positional noise applied to points.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct JitterParams {
    /// Probability in `[0, 1]` that a point is displaced on a given draw.
    pub chance: f64,
    /// Displacement bound per axis, as a fraction of lattice spacing.
    pub multiplier: f64,
    /// Extra damping in `[0, 1]` for points in or claimed by the logo.
    pub logo_factor: f64,
}

impl Default for JitterParams {
    fn default() -> Self {
        Self {
            chance: 0.3,
            multiplier: 0.2,
            logo_factor: 0.5,
        }
    }
}

impl JitterParams {
    pub fn validate(&self) -> PolymarkResult<()> {
        if !(0.0..=1.0).contains(&self.chance) {
            return Err(PolymarkError::validation(format!(
                "jitter chance must be in [0, 1] (got {})",
                self.chance
            )));
        }
        if !(0.0..MAX_JITTER_MULTIPLIER).contains(&self.multiplier) {
            return Err(PolymarkError::validation(format!(
                "jitter multiplier must be in [0, {MAX_JITTER_MULTIPLIER}) (got {})",
                self.multiplier
            )));
        }
        if !(0.0..=1.0).contains(&self.logo_factor) {
            return Err(PolymarkError::validation(format!(
                "jitter logo_factor must be in [0, 1] (got {})",
                self.logo_factor
            )));
        }
        Ok(())
    }

    /// Per-axis displacement bound for lattice spacing `min_delta`.
    pub fn range(&self, min_delta: f64) -> f64 {
        min_delta * self.multiplier
    }

    /// Draw one jitter sample, or `None` when the chance roll fails.
    ///
    /// All rolls are consumed even on a miss, so a point's stream does not
    /// depend on whether it was damped.
    pub fn sample(&self, rng: &mut impl Rng, range: f64, damped: bool) -> Option<Vec2> {
        let hit = rng.random::<f64>() < self.chance;
        let bound = if damped { range * self.logo_factor } else { range };
        let dx = rng.random_range(-1.0_f64..=1.0) * bound;
        let dy = rng.random_range(-1.0_f64..=1.0) * bound;
        hit.then_some(Vec2::new(dx, dy))
    }
}

fn mix64(mut z: u64) -> u64 {
    // SplitMix64 mixing function.
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Independent random stream for one point at one tick.
pub(crate) fn point_rng(seed: u64, tick: u64, id: PointId) -> StdRng {
    let k = mix64(seed ^ 0x9E37_79B9_7F4A_7C15);
    let k = mix64(k ^ tick.wrapping_mul(0xD1B5_4A32_D192_ED03));
    let k = mix64(k ^ (id.0 as u64).wrapping_mul(0x8CB9_2BA7_2F3D_8DD7));
    StdRng::seed_from_u64(k)
}

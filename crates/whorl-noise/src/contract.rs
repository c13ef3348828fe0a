//! The common noise contract.
//!
//! Every noise algorithm maps a point in N-dimensional space to a value in
//! `[-1.0, 1.0]`, deterministically for a given seed. Algorithms declare the
//! dimension range they support; sampling outside that range through the
//! infallible path returns `0.0`, while [`Noise::try_sample`] reports it as
//! an error.

use crate::error::NoiseError;

/// Largest dimensionality any built-in algorithm supports.
pub const MAX_DIMENSION: usize = 7;

/// Offset applied per coordinate by the generic [`Noise::sample_with_seed`]
/// fallback, scaled by the requested seed.
const SEED_OFFSET_SCALE: f64 = 1.0 / 65_536.0;

/// A deterministic, continuous noise field over N-dimensional space.
pub trait Noise: Send + core::fmt::Debug {
    /// Stable identifier used by the registry and state strings.
    fn tag(&self) -> &'static str;

    /// Smallest supported point dimensionality.
    fn min_dimension(&self) -> usize;

    /// Largest supported point dimensionality.
    fn max_dimension(&self) -> usize;

    /// Seed currently in effect.
    fn seed(&self) -> i64;

    /// Re-seed the field, regenerating any per-seed auxiliary structures.
    fn set_seed(&mut self, seed: i64);

    /// Whether [`Noise::set_seed`] is cheap for this algorithm.
    ///
    /// Algorithms that derive bulky per-seed structures (such as rotation
    /// matrices) report `false`; callers that need many seeds per point are
    /// better served by [`Noise::sample_with_seed`].
    fn has_efficient_set_seed(&self) -> bool {
        true
    }

    /// Sample the field at `point`.
    ///
    /// Out-of-range dimensionalities yield `0.0`. The result is always within
    /// `[-1.0, 1.0]`.
    fn sample(&self, point: &[f64]) -> f64;

    /// Sample the field at `point`, reporting unsupported dimensionalities
    /// instead of flattening them to `0.0`.
    fn try_sample(&self, point: &[f64]) -> Result<f64, NoiseError> {
        let dimension = point.len();
        if dimension < self.min_dimension() || dimension > self.max_dimension() {
            return Err(NoiseError::UnsupportedDimension {
                dimension,
                min: self.min_dimension(),
                max: self.max_dimension(),
            });
        }
        Ok(self.sample(point))
    }

    /// Sample as if the field had been seeded with `seed`, without mutating
    /// this instance.
    ///
    /// The default implementation shifts every coordinate by a seed-scaled
    /// offset, which decorrelates nearby seeds without regenerating per-seed
    /// structures. Algorithms with cheap seeding override this with an exact
    /// re-seeded sample.
    fn sample_with_seed(&self, point: &[f64], seed: i64) -> f64 {
        if point.len() > MAX_DIMENSION {
            return 0.0;
        }
        let offset = seed as f64 * SEED_OFFSET_SCALE;
        let mut shifted = [0.0_f64; MAX_DIMENSION];
        for (slot, &coord) in shifted.iter_mut().zip(point.iter()) {
            *slot = coord + offset;
        }
        self.sample(&shifted[..point.len()])
    }

    /// Two-coordinate convenience form of [`Noise::sample`].
    fn sample2(&self, x: f64, y: f64) -> f64 {
        self.sample(&[x, y])
    }

    /// Three-coordinate convenience form of [`Noise::sample`].
    fn sample3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.sample(&[x, y, z])
    }

    /// Four-coordinate convenience form of [`Noise::sample`].
    fn sample4(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        self.sample(&[x, y, z, w])
    }

    /// Five-coordinate convenience form of [`Noise::sample`].
    fn sample5(&self, x: f64, y: f64, z: f64, w: f64, u: f64) -> f64 {
        self.sample(&[x, y, z, w, u])
    }

    /// Six-coordinate convenience form of [`Noise::sample`].
    fn sample6(&self, x: f64, y: f64, z: f64, w: f64, u: f64, v: f64) -> f64 {
        self.sample(&[x, y, z, w, u, v])
    }

    /// Seven-coordinate convenience form of [`Noise::sample`].
    #[allow(clippy::too_many_arguments)]
    fn sample7(&self, x: f64, y: f64, z: f64, w: f64, u: f64, v: f64, t: f64) -> f64 {
        self.sample(&[x, y, z, w, u, v, t])
    }

    /// Serialize the full configuration to a state string.
    fn save_state(&self) -> String;

    /// Restore configuration from a state string produced by
    /// [`Noise::save_state`].
    fn load_state(&mut self, text: &str) -> Result<(), NoiseError>;

    /// Clone into a boxed trait object.
    fn boxed_copy(&self) -> Box<dyn Noise>;
}

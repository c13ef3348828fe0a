//! Cyclic noise for 2 to 7 dimensions.
//!
//! Instead of a lattice, each octave warps the sample point sinusoidally,
//! rotates it through a seed-derived orthogonal matrix, and accumulates a
//! ring of `cos * sin` products over adjacent coordinate pairs. The rotation
//! matrices are built once per seed with a chain of Householder reflections,
//! so re-seeding is the expensive operation here and
//! [`Noise::has_efficient_set_seed`] reports `false`.

use std::f64::consts::PI;

use whorl_rng::engines::SplitMix64;
use whorl_rng::serialize::{
    expect_fields, join_fields, parse_f64, parse_i64, parse_u64, split_fields,
};
use whorl_rng::GeneratorExt;

use crate::contract::Noise;
use crate::error::NoiseError;

const MIN_DIM: usize = 2;
const MAX_DIM: usize = 7;

/// Rotation matrices cycle through this many independently drawn slots.
const SLOTS: usize = 4;

/// Amplitude of the sinusoidal domain warp.
const WARP_AMOUNT: f64 = 0.35;

/// Per-octave growth of the warp phase track.
const WARP_LACUNARITY: f64 = 1.6;

/// Per-octave frequency growth.
const LACUNARITY: f64 = 1.6;

/// Per-octave amplitude decay.
const GAIN: f64 = 0.5;

/// Seed-derived orthogonal matrices for every supported dimension, in
/// `SLOTS` independent variants.
#[derive(Debug, Clone, PartialEq)]
struct RotationBundle {
    /// `mats[slot * (MAX_DIM - 1) + (dim - 2)]` holds `dim * dim` floats,
    /// row-major.
    mats: Vec<Vec<f64>>,
}

impl RotationBundle {
    fn derive(seed: i64) -> Self {
        let mut rng = SplitMix64::new(seed as u64);
        let mut mats = Vec::with_capacity(SLOTS * (MAX_DIM - 1));
        for _ in 0..SLOTS {
            // Grow an orthogonal matrix one dimension at a time: embed the
            // previous one in the lower-right block and reflect the result
            // through a random Householder plane.
            let mut prev = vec![if rng.next_bool() { -1.0 } else { 1.0 }];
            for dim in MIN_DIM..=MAX_DIM {
                let next = householder_extend(&prev, dim, &mut rng);
                mats.push(next.clone());
                prev = next;
            }
        }
        Self { mats }
    }

    fn matrix(&self, dim: usize, slot: usize) -> &[f64] {
        &self.mats[slot * (MAX_DIM - 1) + (dim - 2)]
    }
}

/// Embed an `(n-1) x (n-1)` orthogonal matrix into `n` dimensions and apply
/// a random Householder reflection, yielding an `n x n` orthogonal matrix.
fn householder_extend(prev: &[f64], n: usize, rng: &mut SplitMix64) -> Vec<f64> {
    let mut emb = vec![0.0_f64; n * n];
    emb[0] = 1.0;
    for r in 0..n - 1 {
        for c in 0..n - 1 {
            emb[(r + 1) * n + (c + 1)] = prev[r * (n - 1) + c];
        }
    }

    let mut v = vec![0.0_f64; n];
    let norm = loop {
        for slot in v.iter_mut() {
            *slot = rng.next_gaussian();
        }
        let sq: f64 = v.iter().map(|c| c * c).sum();
        if sq > 1e-12 {
            break sq.sqrt();
        }
    };
    // u = v + sign(v[0]) * |v| * e0 guards against cancellation.
    let mut u = v;
    u[0] += norm.copysign(u[0]);
    let uu: f64 = u.iter().map(|c| c * c).sum();

    let mut out = vec![0.0_f64; n * n];
    for c in 0..n {
        let w: f64 = (0..n).map(|r| u[r] * emb[r * n + c]).sum();
        let k = 2.0 * w / uu;
        for r in 0..n {
            out[r * n + c] = emb[r * n + c] - k * u[r];
        }
    }
    out
}

/// Lattice-free rotational noise, dimensions 2 through 7.
#[derive(Debug, Clone, PartialEq)]
pub struct CyclicNoise {
    seed: i64,
    octaves: u32,
    frequency: f64,
    rotations: RotationBundle,
}

impl CyclicNoise {
    pub const TAG: &'static str = "Cyclic";

    pub fn new(seed: i64) -> Self {
        Self {
            seed,
            octaves: 3,
            frequency: 1.0,
            rotations: RotationBundle::derive(seed),
        }
    }

    /// Octave count, clamped to at least 1.
    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves.max(1);
        self
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Mutating form of [`CyclicNoise::with_octaves`]. The rotation bundle
    /// depends only on the seed, so no rebuild is needed.
    pub fn set_octaves(&mut self, octaves: u32) {
        self.octaves = octaves.max(1);
    }

    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
    }

    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }
}

impl Default for CyclicNoise {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Noise for CyclicNoise {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn min_dimension(&self) -> usize {
        MIN_DIM
    }

    fn max_dimension(&self) -> usize {
        MAX_DIM
    }

    fn seed(&self) -> i64 {
        self.seed
    }

    fn set_seed(&mut self, seed: i64) {
        self.seed = seed;
        self.rotations = RotationBundle::derive(seed);
    }

    fn has_efficient_set_seed(&self) -> bool {
        false
    }

    fn sample(&self, point: &[f64]) -> f64 {
        let d = point.len();
        if !(MIN_DIM..=MAX_DIM).contains(&d) {
            return 0.0;
        }

        let mut coords = [0.0_f64; MAX_DIM];
        for i in 0..d {
            coords[i] = point[i] * self.frequency;
        }

        let mut sum = 0.0;
        let mut total = 0.0;
        let mut amp = 1.0;
        let mut warp_track = 0.8;
        let mut warped = [0.0_f64; MAX_DIM];
        let mut rotated = [0.0_f64; MAX_DIM];
        for octave in 0..self.octaves {
            let m = self.rotations.matrix(d, octave as usize % SLOTS);
            for i in 0..d {
                warped[i] = coords[i] + ((i as f64 - 2.0) * warp_track).sin() * WARP_AMOUNT;
            }
            for r in 0..d {
                rotated[r] = (0..d).map(|c| m[r * d + c] * warped[c]).sum();
            }
            let mut ring = 0.0;
            for i in 0..d {
                ring += rotated[i].cos() * rotated[(i + 1) % d].sin();
            }
            // ring is in [-d, d]; the outer sine folds it back to [-1, 1].
            sum += (ring * (PI / d as f64)).sin() * amp;
            total += amp;
            amp *= GAIN;
            warp_track *= WARP_LACUNARITY;
            for i in 0..d {
                coords[i] = rotated[i] * LACUNARITY;
            }
        }
        sum / total
    }

    fn save_state(&self) -> String {
        join_fields(&[
            self.seed.to_string(),
            self.octaves.to_string(),
            self.frequency.to_string(),
        ])
    }

    fn load_state(&mut self, text: &str) -> Result<(), NoiseError> {
        let fields = split_fields(text)?;
        expect_fields(&fields, 3)?;
        self.octaves = (parse_u64(fields[1]) as u32).max(1);
        self.frequency = parse_f64(fields[2]);
        self.set_seed(parse_i64(fields[0]));
        Ok(())
    }

    fn boxed_copy(&self) -> Box<dyn Noise> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    /// Every derived matrix satisfies M * M^T = I.
    #[test]
    fn rotation_matrices_are_orthogonal() {
        let bundle = RotationBundle::derive(913);
        for slot in 0..SLOTS {
            for dim in MIN_DIM..=MAX_DIM {
                let m = bundle.matrix(dim, slot);
                for r in 0..dim {
                    for c in 0..dim {
                        let dot: f64 = (0..dim).map(|k| m[r * dim + k] * m[c * dim + k]).sum();
                        let expected = if r == c { 1.0 } else { 0.0 };
                        assert_relative_eq!(dot, expected, epsilon = 1e-10);
                    }
                }
            }
        }
    }

    /// Rebuilding the bundle from the same seed reproduces it exactly.
    #[test]
    fn bundle_is_deterministic_per_seed() {
        assert_eq!(RotationBundle::derive(-4), RotationBundle::derive(-4));
        assert_ne!(RotationBundle::derive(-4), RotationBundle::derive(5));
    }

    #[test]
    fn state_string_round_trips() {
        let noise = CyclicNoise::new(88).with_octaves(5).with_frequency(0.25);
        let mut other = CyclicNoise::new(0);
        other.load_state(&noise.save_state()).unwrap();
        assert_eq!(noise, other);
    }

    #[test]
    fn octaves_clamp_to_one() {
        assert_eq!(CyclicNoise::new(0).with_octaves(0).octaves(), 1);
    }
}

//! Gradient (Perlin-family) noise for 2 to 6 dimensions.
//!
//! Each lattice corner contributes the dot product of a hashed unit gradient
//! with the offset to the sample point, plus a small hashed bias that breaks
//! the zero at lattice points. Contributions are blended with a cubic ease
//! and the raw value is passed through a per-dimension equalizer that spreads
//! the amplitude toward the full `[-1.0, 1.0]` span.

use whorl_rng::mix::hash_nd;
use whorl_rng::serialize::{expect_fields, join_fields, parse_i64, split_fields};

use crate::contract::Noise;
use crate::error::NoiseError;
use crate::tables;

/// Per-dimension post-blend scale, `2 / sqrt(d)` for d in 2..=6.
const SCALE: [f64; 5] = [1.414_213_3, 1.154_700_3, 0.999_999_9, 0.894_426_9, 0.816_496_5];

/// Equalizer shape terms for d in 2..=6; `equalize(x) = x * mul / sqrt(x*x + add)`.
const EQ_ADD: [f64; 5] = [
    1.0 / 0.85,
    0.8 / 0.75,
    0.6 / 0.7,
    0.4 / 0.65,
    0.2 / 0.6,
];
const EQ_MUL: [f64; 5] = [1.253_566_4, 1.207_121_7, 1.158_817_2, 1.108_409_4, 1.055_597_3];

/// Strength of the hashed per-corner bias term.
const BIAS_SCALE: f64 = 1.0 / 2048.0;

/// Lattice gradient noise, dimensions 2 through 6.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientNoise {
    seed: i64,
}

impl GradientNoise {
    pub const TAG: &'static str = "Gradient";

    pub fn new(seed: i64) -> Self {
        Self { seed }
    }

    fn sample_seeded(&self, point: &[f64], seed: i64) -> f64 {
        let d = point.len();
        if !(2..=6).contains(&d) {
            return 0.0;
        }

        let mut lattice = [0_i64; 6];
        let mut frac = [0.0_f64; 6];
        let mut ease = [0.0_f64; 6];
        for i in 0..d {
            let floor = point[i].floor();
            lattice[i] = floor as i64;
            let t = point[i] - floor;
            frac[i] = t;
            ease[i] = t * t * (3.0 - 2.0 * t);
        }

        let mut sum = 0.0;
        let mut cell = [0_i64; 6];
        for corner in 0_u32..(1 << d) {
            let mut weight = 1.0;
            for i in 0..d {
                let bit = (corner >> i) & 1;
                cell[i] = lattice[i] + bit as i64;
                weight *= if bit == 1 { ease[i] } else { 1.0 - ease[i] };
            }
            let h = hash_nd(&cell[..d], seed as u64);
            let grad = tables::gradient(d, (h & 0xFF) as u8);
            let mut dot = 0.0;
            for i in 0..d {
                let bit = ((corner >> i) & 1) as f64;
                dot += grad[i] * (frac[i] - bit);
            }
            let bias = (((h >> 8) & 0xFF) as f64 - 127.5) * BIAS_SCALE;
            sum += weight * (dot + bias);
        }

        equalize(sum * SCALE[d - 2], d)
    }
}

/// Soft-saturating amplitude correction; keeps output within `[-1.0, 1.0]`
/// while pushing typical values toward the ends of the span.
fn equalize(x: f64, d: usize) -> f64 {
    x * EQ_MUL[d - 2] / (x * x + EQ_ADD[d - 2]).sqrt()
}

impl Default for GradientNoise {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Noise for GradientNoise {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn min_dimension(&self) -> usize {
        2
    }

    fn max_dimension(&self) -> usize {
        6
    }

    fn seed(&self) -> i64 {
        self.seed
    }

    fn set_seed(&mut self, seed: i64) {
        self.seed = seed;
    }

    fn sample(&self, point: &[f64]) -> f64 {
        self.sample_seeded(point, self.seed)
    }

    fn sample_with_seed(&self, point: &[f64], seed: i64) -> f64 {
        self.sample_seeded(point, seed)
    }

    fn save_state(&self) -> String {
        join_fields(&[self.seed.to_string()])
    }

    fn load_state(&mut self, text: &str) -> Result<(), NoiseError> {
        let fields = split_fields(text)?;
        expect_fields(&fields, 1)?;
        self.seed = parse_i64(fields[0]);
        Ok(())
    }

    fn boxed_copy(&self) -> Box<dyn Noise> {
        Box::new(self.clone())
    }
}

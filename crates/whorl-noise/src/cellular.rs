//! Cellular (Worley) noise for 1 to 4 dimensions.
//!
//! Each integer cell owns one feature point, placed by a hashed lookup into
//! the shared offset tables. Sampling scans the 3^d cells around the rounded
//! sample point, tracks the two nearest features, and maps them to a value
//! through the configured [`CellReturn`] policy.

use whorl_rng::mix::hash_nd;
use whorl_rng::serialize::{expect_fields, join_fields, parse_i64, parse_u64, split_fields};

use crate::contract::Noise;
use crate::error::NoiseError;
use crate::gradient::GradientNoise;
use crate::tables;

const MIN_DIM: usize = 1;
const MAX_DIM: usize = 4;

/// How the two nearest feature distances become a noise value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellReturn {
    /// Constant per cell, from the winning cell's hash.
    CellValue,
    /// Gradient noise evaluated at the winning feature point.
    NoiseLookup,
    /// Nearest distance.
    Distance,
    /// Second-nearest distance.
    Distance2,
    /// Mean of the two distances.
    Distance2Add,
    /// Gap between the two distances.
    Distance2Sub,
    /// Product of the two distances.
    Distance2Mul,
    /// Ratio of nearest to second-nearest.
    Distance2Div,
}

impl CellReturn {
    pub(crate) fn index(self) -> u8 {
        match self {
            CellReturn::CellValue => 0,
            CellReturn::NoiseLookup => 1,
            CellReturn::Distance => 2,
            CellReturn::Distance2 => 3,
            CellReturn::Distance2Add => 4,
            CellReturn::Distance2Sub => 5,
            CellReturn::Distance2Mul => 6,
            CellReturn::Distance2Div => 7,
        }
    }

    /// Inverse of [`CellReturn::index`]; unknown indices degrade to the
    /// default policy, matching the codec's tolerance for bad fields.
    pub(crate) fn from_index(index: u8) -> Self {
        match index {
            0 => CellReturn::CellValue,
            1 => CellReturn::NoiseLookup,
            3 => CellReturn::Distance2,
            4 => CellReturn::Distance2Add,
            5 => CellReturn::Distance2Sub,
            6 => CellReturn::Distance2Mul,
            7 => CellReturn::Distance2Div,
            _ => CellReturn::Distance,
        }
    }
}

/// Feature-point noise, dimensions 1 through 4.
#[derive(Debug, Clone, PartialEq)]
pub struct CellularNoise {
    seed: i64,
    policy: CellReturn,
    lookup: GradientNoise,
}

impl CellularNoise {
    pub const TAG: &'static str = "Cellular";

    pub fn new(seed: i64) -> Self {
        Self {
            seed,
            policy: CellReturn::Distance,
            lookup: GradientNoise::new(seed),
        }
    }

    pub fn with_return(mut self, policy: CellReturn) -> Self {
        self.policy = policy;
        self
    }

    /// Mutating form of [`CellularNoise::with_return`].
    pub fn set_return(&mut self, policy: CellReturn) {
        self.policy = policy;
    }

    pub fn return_policy(&self) -> CellReturn {
        self.policy
    }

    fn sample_seeded(&self, point: &[f64], seed: i64) -> f64 {
        let d = point.len();
        if !(MIN_DIM..=MAX_DIM).contains(&d) {
            return 0.0;
        }

        let mut base = [0_i64; MAX_DIM];
        for i in 0..d {
            base[i] = point[i].round() as i64;
        }

        let mut best = f64::MAX;
        let mut second = f64::MAX;
        let mut best_hash = 0_u64;
        let mut best_feature = [0.0_f64; MAX_DIM];

        let mut cell = [0_i64; MAX_DIM];
        let mut feature = [0.0_f64; MAX_DIM];
        let scan = 3_u32.pow(d as u32);
        for combo in 0..scan {
            let mut rem = combo;
            for i in 0..d {
                cell[i] = base[i] + (rem % 3) as i64 - 1;
                rem /= 3;
            }
            let h = hash_nd(&cell[..d], seed as u64);
            let offset = tables::cell_offset(d, (h & 0xFF) as u8);
            let mut dist = 0.0;
            for i in 0..d {
                feature[i] = cell[i] as f64 + offset[i];
                let delta = point[i] - feature[i];
                dist += delta * delta;
            }
            if dist < best {
                second = best;
                best = dist;
                best_hash = h;
                best_feature[..d].copy_from_slice(&feature[..d]);
            } else if dist < second {
                second = dist;
            }
        }

        let d1 = best.sqrt();
        let d2 = second.sqrt();
        match self.policy {
            // The winning hash, reinterpreted as a signed fixed-point value.
            CellReturn::CellValue => best_hash as i64 as f64 / i64::MAX as f64,
            CellReturn::NoiseLookup => {
                if d == 1 {
                    self.lookup
                        .sample_with_seed(&[best_feature[0], 0.0], seed)
                } else {
                    self.lookup.sample_with_seed(&best_feature[..d], seed)
                }
            }
            CellReturn::Distance => (d1 - 1.0).clamp(-1.0, 1.0),
            CellReturn::Distance2 => (d2 - 1.0).clamp(-1.0, 1.0),
            CellReturn::Distance2Add => ((d1 + d2) * 0.5 - 1.0).clamp(-1.0, 1.0),
            CellReturn::Distance2Sub => (d2 - d1 - 1.0).clamp(-1.0, 1.0),
            CellReturn::Distance2Mul => (d1 * d2 - 1.0).clamp(-1.0, 1.0),
            CellReturn::Distance2Div => {
                if d2 > 0.0 {
                    (d1 / d2 * 2.0 - 1.0).clamp(-1.0, 1.0)
                } else {
                    -1.0
                }
            }
        }
    }
}

impl Default for CellularNoise {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Noise for CellularNoise {
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
        self.lookup.set_seed(seed);
    }

    fn sample(&self, point: &[f64]) -> f64 {
        self.sample_seeded(point, self.seed)
    }

    fn sample_with_seed(&self, point: &[f64], seed: i64) -> f64 {
        self.sample_seeded(point, seed)
    }

    fn save_state(&self) -> String {
        join_fields(&[self.seed.to_string(), self.policy.index().to_string()])
    }

    fn load_state(&mut self, text: &str) -> Result<(), NoiseError> {
        let fields = split_fields(text)?;
        expect_fields(&fields, 2)?;
        self.policy = CellReturn::from_index(parse_u64(fields[1]) as u8);
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
    use pretty_assertions::assert_eq;

    #[test]
    fn return_policy_indices_round_trip() {
        let all = [
            CellReturn::CellValue,
            CellReturn::NoiseLookup,
            CellReturn::Distance,
            CellReturn::Distance2,
            CellReturn::Distance2Add,
            CellReturn::Distance2Sub,
            CellReturn::Distance2Mul,
            CellReturn::Distance2Div,
        ];
        for policy in all {
            assert_eq!(CellReturn::from_index(policy.index()), policy);
        }
        assert_eq!(CellReturn::from_index(200), CellReturn::Distance);
    }

    #[test]
    fn state_string_round_trips() {
        let noise = CellularNoise::new(41).with_return(CellReturn::Distance2Mul);
        let mut other = CellularNoise::new(0);
        other.load_state(&noise.save_state()).unwrap();
        assert_eq!(noise, other);
    }

    /// The second-nearest distance is never below the nearest.
    #[test]
    fn distance2_dominates_distance() {
        let near = CellularNoise::new(7).with_return(CellReturn::Distance);
        let far = CellularNoise::new(7).with_return(CellReturn::Distance2);
        for step in 0..200 {
            let p = [step as f64 * 0.173, step as f64 * -0.061];
            assert!(far.sample(&p) >= near.sample(&p) - 1e-12);
        }
    }
}

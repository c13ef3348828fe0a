//! Fractal (octave-summed) wrapper over any base noise.

use whorl_rng::serialize::{
    expect_fields, join_fields, parse_f64, parse_i64, parse_u64, split_fields,
};

use crate::contract::{Noise, MAX_DIMENSION};
use crate::error::NoiseError;

/// Sums progressively finer, quieter octaves of a base field.
///
/// The result is normalized by the total amplitude, so it stays within
/// `[-1.0, 1.0]` whenever the base field does.
#[derive(Debug, Clone, PartialEq)]
pub struct FractalNoise<N> {
    base: N,
    octaves: u32,
    gain: f64,
    lacunarity: f64,
    frequency: f64,
}

impl<N: Noise> FractalNoise<N> {
    pub const TAG: &'static str = "Fractal";

    pub fn new(base: N) -> Self {
        Self {
            base,
            octaves: 4,
            gain: 0.5,
            lacunarity: 2.0,
            frequency: 1.0,
        }
    }

    /// Octave count, clamped to at least 1.
    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves.max(1);
        self
    }

    pub fn with_gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self
    }

    pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    pub fn base(&self) -> &N {
        &self.base
    }

    fn accumulate(&self, point: &[f64], sample: impl Fn(&[f64]) -> f64) -> f64 {
        let d = point.len();
        if d < self.base.min_dimension() || d > self.base.max_dimension() {
            return 0.0;
        }
        let mut coords = [0.0_f64; MAX_DIMENSION];
        let mut freq = self.frequency;
        let mut amp = 1.0;
        let mut sum = 0.0;
        let mut total = 0.0;
        for _ in 0..self.octaves {
            for i in 0..d {
                coords[i] = point[i] * freq;
            }
            sum += sample(&coords[..d]) * amp;
            total += amp;
            freq *= self.lacunarity;
            amp *= self.gain;
        }
        sum / total
    }
}

impl<N: Noise + Default> Default for FractalNoise<N> {
    fn default() -> Self {
        Self::new(N::default())
    }
}

impl<N: Noise + Clone + 'static> Noise for FractalNoise<N> {
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    fn min_dimension(&self) -> usize {
        self.base.min_dimension()
    }

    fn max_dimension(&self) -> usize {
        self.base.max_dimension()
    }

    fn seed(&self) -> i64 {
        self.base.seed()
    }

    fn set_seed(&mut self, seed: i64) {
        self.base.set_seed(seed);
    }

    fn has_efficient_set_seed(&self) -> bool {
        self.base.has_efficient_set_seed()
    }

    fn sample(&self, point: &[f64]) -> f64 {
        self.accumulate(point, |coords| self.base.sample(coords))
    }

    fn sample_with_seed(&self, point: &[f64], seed: i64) -> f64 {
        self.accumulate(point, |coords| self.base.sample_with_seed(coords, seed))
    }

    fn save_state(&self) -> String {
        join_fields(&[
            self.octaves.to_string(),
            self.gain.to_string(),
            self.lacunarity.to_string(),
            self.frequency.to_string(),
            self.base.seed().to_string(),
        ])
    }

    fn load_state(&mut self, text: &str) -> Result<(), NoiseError> {
        let fields = split_fields(text)?;
        expect_fields(&fields, 5)?;
        self.octaves = (parse_u64(fields[0]) as u32).max(1);
        self.gain = parse_f64(fields[1]);
        self.lacunarity = parse_f64(fields[2]);
        self.frequency = parse_f64(fields[3]);
        self.base.set_seed(parse_i64(fields[4]));
        Ok(())
    }

    fn boxed_copy(&self) -> Box<dyn Noise> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::GradientNoise;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_octave_matches_scaled_base() {
        let base = GradientNoise::new(12);
        let fractal = FractalNoise::new(base.clone())
            .with_octaves(1)
            .with_frequency(0.5);
        let p = [3.7, -1.2, 0.4];
        assert_relative_eq!(
            fractal.sample(&p),
            base.sample(&[1.85, -0.6, 0.2]),
            epsilon = 1e-12
        );
    }

    #[test]
    fn state_string_round_trips() {
        let fractal = FractalNoise::new(GradientNoise::new(9))
            .with_octaves(6)
            .with_gain(0.4)
            .with_lacunarity(1.9)
            .with_frequency(2.0);
        let mut other = FractalNoise::new(GradientNoise::new(0));
        other.load_state(&fractal.save_state()).unwrap();
        assert_eq!(fractal, other);
    }

    #[test]
    fn octaves_clamp_to_one() {
        let fractal = FractalNoise::new(GradientNoise::new(0)).with_octaves(0);
        assert_eq!(fractal.octaves(), 1);
    }
}

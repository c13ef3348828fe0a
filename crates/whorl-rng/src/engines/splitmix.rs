//! Counter-based engine: one 64-bit Weyl counter pushed through an
//! avalanche mixer.

use crate::error::RngError;
use crate::generator::Generator;
use crate::mix::{mix64, GOLDEN_GAMMA};

/// Counter-based generator with a single 64-bit state word.
///
/// The state is a pure Weyl counter (increment `GOLDEN_GAMMA` per step) and
/// the output is `mix64` of it, so the period is exactly 2^64 for every
/// seed, every distinct state produces a distinct output, and both
/// [`previous_u64`](Generator::previous_u64) and [`skip`](Generator::skip)
/// are exact O(1) operations.
///
/// Seeds are taken verbatim as the starting counter; with a full-period
/// counter there is nothing for seed mixing to improve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Create a generator starting from the given counter value.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Create a generator seeded from process entropy.
    pub fn new_random() -> Self {
        Self::new(rand::random())
    }
}

impl Default for SplitMix64 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Generator for SplitMix64 {
    fn tag(&self) -> &'static str {
        "SplitMix64"
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        mix64(self.state)
    }

    fn set_seed(&mut self, seed: u64) {
        self.state = seed;
    }

    fn state_count(&self) -> usize {
        1
    }

    fn state(&self, index: usize) -> Result<u64, RngError> {
        match index {
            0 => Ok(self.state),
            _ => Err(RngError::StateIndex { index, count: 1 }),
        }
    }

    fn set_state_word(&mut self, index: usize, value: u64) -> Result<(), RngError> {
        match index {
            0 => {
                self.state = value;
                Ok(())
            }
            _ => Err(RngError::StateIndex { index, count: 1 }),
        }
    }

    fn previous_u64(&mut self) -> Result<u64, RngError> {
        self.state = self.state.wrapping_sub(GOLDEN_GAMMA);
        Ok(mix64(self.state))
    }

    fn skip(&mut self, delta: i64) -> Result<u64, RngError> {
        self.state = self
            .state
            .wrapping_add(GOLDEN_GAMMA.wrapping_mul(delta as u64));
        Ok(mix64(self.state))
    }

    fn boxed_copy(&self) -> Box<dyn Generator> {
        Box::new(self.clone())
    }
}

super::impl_rand_core!(SplitMix64);

#[cfg(feature = "serde")]
super::impl_serde_via_state!(SplitMix64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Generator;

    #[test]
    fn test_next_previous_roundtrip() {
        let mut g = SplitMix64::new(0xFEED_FACE);
        let a = g.next_u64();
        let b = g.next_u64();
        assert_ne!(a, b);
        assert_eq!(g.previous_u64().unwrap(), a);
        let snapshot = g.clone();
        g.previous_u64().unwrap();
        g.next_u64();
        assert_eq!(g, snapshot);
    }

    #[test]
    fn test_skip_matches_stepping() {
        let mut walker = SplitMix64::new(42);
        let mut jumper = SplitMix64::new(42);
        let mut last = 0;
        for _ in 0..10 {
            last = walker.next_u64();
        }
        assert_eq!(jumper.skip(10).unwrap(), last);
        assert_eq!(jumper.skip(-9).unwrap(), SplitMix64::new(42).next_u64());
    }

    #[test]
    fn test_set_seed_matches_fresh() {
        let mut g = SplitMix64::new(7);
        g.next_u64();
        g.next_u64();
        g.set_seed(7);
        assert_eq!(g.next_u64(), SplitMix64::new(7).next_u64());
    }

    #[test]
    fn test_rand_core_interop() {
        use rand::Rng;
        let mut g = SplitMix64::new(5);
        let v: f64 = g.gen();
        assert!((0.0..1.0).contains(&v));
        let mut bytes = [0u8; 13];
        rand::RngCore::fill_bytes(&mut g, &mut bytes);
        assert_ne!(bytes, [0u8; 13]);
    }
}

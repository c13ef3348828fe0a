//! Four-word 32-bit engine with an add/xor/shift schedule and a Weyl
//! counter word.

use crate::error::RngError;
use crate::generator::Generator;
use crate::mix::{mix64, GOLDEN_GAMMA};

/// Odd increment for the counter word; guarantees the minimum period.
const INCREMENT: u32 = 0xADB5_B165;

/// Four 32-bit state words mixed by an add/xor/shift/rotate schedule.
///
/// Word `d` is a pure counter with a fixed odd increment, so the minimum
/// period is 2^32 regardless of the other words; the expected period is far
/// longer. There is no direct inverse step and no jump, so
/// [`previous_u64`](Generator::previous_u64) and [`skip`](Generator::skip)
/// report unsupported.
///
/// State introspection works on 32-bit words widened to `u64`;
/// [`set_state_word`](Generator::set_state_word) truncates to 32 bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coil32 {
    a: u32,
    b: u32,
    c: u32,
    d: u32,
}

impl Coil32 {
    /// Create a generator from a seed, expanded to four words through a
    /// `mix64` chain.
    pub fn new(seed: u64) -> Self {
        let lo = mix64(seed);
        let hi = mix64(seed.wrapping_add(GOLDEN_GAMMA));
        Self {
            a: lo as u32,
            b: (lo >> 32) as u32,
            c: hi as u32,
            d: (hi >> 32) as u32,
        }
    }

    /// Create a generator from four raw state words, bypassing seed
    /// mixing.
    pub fn from_state(a: u32, b: u32, c: u32, d: u32) -> Self {
        Self { a, b, c, d }
    }

    /// Create a generator seeded from process entropy.
    pub fn new_random() -> Self {
        Self::new(rand::random())
    }

    #[inline]
    fn step(&mut self) -> u32 {
        let out = self.a.wrapping_add(self.b).wrapping_add(self.d);
        self.d = self.d.wrapping_add(INCREMENT);
        self.a = self.b ^ (self.b >> 9);
        self.b = self.c.wrapping_add(self.c << 3);
        self.c = self.c.rotate_left(21).wrapping_add(out);
        out
    }
}

impl Default for Coil32 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Generator for Coil32 {
    fn tag(&self) -> &'static str {
        "Coil32"
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let hi = self.step() as u64;
        let lo = self.step() as u64;
        (hi << 32) | lo
    }

    fn set_seed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    fn state_count(&self) -> usize {
        4
    }

    fn state(&self, index: usize) -> Result<u64, RngError> {
        match index {
            0 => Ok(self.a as u64),
            1 => Ok(self.b as u64),
            2 => Ok(self.c as u64),
            3 => Ok(self.d as u64),
            _ => Err(RngError::StateIndex { index, count: 4 }),
        }
    }

    fn set_state_word(&mut self, index: usize, value: u64) -> Result<(), RngError> {
        let word = value as u32;
        match index {
            0 => self.a = word,
            1 => self.b = word,
            2 => self.c = word,
            3 => self.d = word,
            _ => return Err(RngError::StateIndex { index, count: 4 }),
        }
        Ok(())
    }

    fn boxed_copy(&self) -> Box<dyn Generator> {
        Box::new(self.clone())
    }
}

super::impl_rand_core!(Coil32);

#[cfg(feature = "serde")]
super::impl_serde_via_state!(Coil32);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Generator;

    #[test]
    fn test_set_seed_matches_fresh() {
        let mut g = Coil32::new(901);
        for _ in 0..5 {
            g.next_u64();
        }
        g.set_seed(901);
        let mut fresh = Coil32::new(901);
        for _ in 0..5 {
            assert_eq!(g.next_u64(), fresh.next_u64());
        }
    }

    #[test]
    fn test_counter_word_advances_by_increment() {
        let mut g = Coil32::new(3);
        let d0 = g.state(3).unwrap() as u32;
        g.next_u64(); // two 32-bit steps
        let d2 = g.state(3).unwrap() as u32;
        assert_eq!(d2, d0.wrapping_add(INCREMENT).wrapping_add(INCREMENT));
    }

    #[test]
    fn test_unsupported_operations_signal() {
        let mut g = Coil32::new(0);
        assert!(matches!(g.previous_u64(), Err(RngError::Unsupported(_))));
        assert!(matches!(g.skip(3), Err(RngError::Unsupported(_))));
    }

    #[test]
    fn test_raw_state_constructor_is_verbatim() {
        let g = Coil32::from_state(1, 2, 3, 4);
        assert_eq!(g.state(0).unwrap(), 1);
        assert_eq!(g.state(3).unwrap(), 4);
    }
}

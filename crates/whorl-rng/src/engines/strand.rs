//! Three-word 64-bit engine with a rotate/xor schedule and a Weyl counter
//! word.

use crate::error::RngError;
use crate::generator::Generator;
use crate::mix::{mix64, GOLDEN_GAMMA};

/// Odd Weyl increment for word `a`.
const INCREMENT: u64 = 0xDB4F_0B91_75AE_2165;

/// Three 64-bit state words mixed by a rotate/xor/add schedule.
///
/// Word `a` is a pure Weyl counter, so the minimum period is 2^64. The
/// schedule is not invertible word-by-word, so neither
/// [`previous_u64`](Generator::previous_u64) nor [`skip`](Generator::skip)
/// is supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strand64 {
    a: u64,
    b: u64,
    c: u64,
}

impl Strand64 {
    /// Create a generator from a seed, expanded through a `mix64` chain.
    pub fn new(seed: u64) -> Self {
        Self {
            a: mix64(seed),
            b: mix64(seed.wrapping_add(GOLDEN_GAMMA)),
            c: mix64(seed.wrapping_add(GOLDEN_GAMMA.wrapping_mul(2))),
        }
    }

    /// Create a generator from three raw state words, bypassing seed
    /// mixing.
    pub fn from_state(a: u64, b: u64, c: u64) -> Self {
        Self { a, b, c }
    }

    /// Create a generator seeded from process entropy.
    pub fn new_random() -> Self {
        Self::new(rand::random())
    }
}

impl Default for Strand64 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Generator for Strand64 {
    fn tag(&self) -> &'static str {
        "Strand64"
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let fa = self.a;
        let fb = self.b;
        let fc = self.c;
        self.a = fa.wrapping_add(INCREMENT);
        self.b = fb.rotate_left(29) ^ fa;
        self.c = fc.wrapping_add(fb).rotate_left(47);
        fa.wrapping_add(fb).rotate_left(31) ^ fc
    }

    fn set_seed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    fn state_count(&self) -> usize {
        3
    }

    fn state(&self, index: usize) -> Result<u64, RngError> {
        match index {
            0 => Ok(self.a),
            1 => Ok(self.b),
            2 => Ok(self.c),
            _ => Err(RngError::StateIndex { index, count: 3 }),
        }
    }

    fn set_state_word(&mut self, index: usize, value: u64) -> Result<(), RngError> {
        match index {
            0 => self.a = value,
            1 => self.b = value,
            2 => self.c = value,
            _ => return Err(RngError::StateIndex { index, count: 3 }),
        }
        Ok(())
    }

    fn boxed_copy(&self) -> Box<dyn Generator> {
        Box::new(self.clone())
    }
}

super::impl_rand_core!(Strand64);

#[cfg(feature = "serde")]
super::impl_serde_via_state!(Strand64);

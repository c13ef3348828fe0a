//! Four-word 64-bit engine with an invertible add/xor/shift schedule and a
//! Weyl counter word.

use crate::error::RngError;
use crate::generator::Generator;
use crate::mix::{mix64, GOLDEN_GAMMA};

/// Modular inverse of 9 (the `c -> b` multiplier) mod 2^64, used by the
/// inverse step.
const INV_NINE: u64 = 0x8E38_E38E_38E3_8E39;

/// Four 64-bit state words mixed by an add/xor/shift/rotate schedule.
///
/// Word `d` is a pure Weyl counter (increment `GOLDEN_GAMMA`), so the
/// minimum period is 2^64. Every part of the transition is invertible
/// (xorshift is a bijection, the `c -> b` map multiplies by the odd
/// constant 9, the rest is add/rotate), so this engine implements
/// [`previous_u64`](Generator::previous_u64) directly. Arbitrary
/// [`skip`](Generator::skip) is not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Helix64 {
    a: u64,
    b: u64,
    c: u64,
    d: u64,
}

impl Helix64 {
    /// Create a generator from a seed, expanded through a `mix64` chain.
    pub fn new(seed: u64) -> Self {
        Self {
            a: mix64(seed),
            b: mix64(seed.wrapping_add(GOLDEN_GAMMA)),
            c: mix64(seed.wrapping_add(GOLDEN_GAMMA.wrapping_mul(2))),
            d: mix64(seed.wrapping_add(GOLDEN_GAMMA.wrapping_mul(3))),
        }
    }

    /// Create a generator from four raw state words, bypassing seed
    /// mixing.
    pub fn from_state(a: u64, b: u64, c: u64, d: u64) -> Self {
        Self { a, b, c, d }
    }

    /// Create a generator seeded from process entropy.
    pub fn new_random() -> Self {
        Self::new(rand::random())
    }

    /// Invert `x ^ (x >> 11)`.
    #[inline]
    fn un_xorshift(value: u64) -> u64 {
        let mut x = value;
        for _ in 0..6 {
            x = value ^ (x >> 11);
        }
        x
    }

    /// Step the state backward by one transition.
    #[inline]
    fn inverse_step(&mut self) {
        let d_old = self.d.wrapping_sub(GOLDEN_GAMMA);
        let b_old = Self::un_xorshift(self.a);
        let c_old = self.b.wrapping_mul(INV_NINE);
        let out = self.c.wrapping_sub(c_old.rotate_left(24));
        let a_old = out.wrapping_sub(b_old).wrapping_sub(d_old);
        self.a = a_old;
        self.b = b_old;
        self.c = c_old;
        self.d = d_old;
    }
}

impl Default for Helix64 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Generator for Helix64 {
    fn tag(&self) -> &'static str {
        "Helix64"
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let out = self.a.wrapping_add(self.b).wrapping_add(self.d);
        self.d = self.d.wrapping_add(GOLDEN_GAMMA);
        self.a = self.b ^ (self.b >> 11);
        self.b = self.c.wrapping_add(self.c << 3);
        self.c = self.c.rotate_left(24).wrapping_add(out);
        out
    }

    fn set_seed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    fn state_count(&self) -> usize {
        4
    }

    fn state(&self, index: usize) -> Result<u64, RngError> {
        match index {
            0 => Ok(self.a),
            1 => Ok(self.b),
            2 => Ok(self.c),
            3 => Ok(self.d),
            _ => Err(RngError::StateIndex { index, count: 4 }),
        }
    }

    fn set_state_word(&mut self, index: usize, value: u64) -> Result<(), RngError> {
        match index {
            0 => self.a = value,
            1 => self.b = value,
            2 => self.c = value,
            3 => self.d = value,
            _ => return Err(RngError::StateIndex { index, count: 4 }),
        }
        Ok(())
    }

    fn previous_u64(&mut self) -> Result<u64, RngError> {
        // Rewind two transitions, then replay one; returns the output
        // before the last one and leaves the state one step back.
        self.inverse_step();
        self.inverse_step();
        Ok(self.next_u64())
    }

    fn boxed_copy(&self) -> Box<dyn Generator> {
        Box::new(self.clone())
    }
}

super::impl_rand_core!(Helix64);

#[cfg(feature = "serde")]
super::impl_serde_via_state!(Helix64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Generator;

    #[test]
    fn test_un_xorshift_inverts() {
        for x in [0u64, 1, 0xDEAD_BEEF, u64::MAX, 0x1234_5678_9ABC_DEF0] {
            let shifted = x ^ (x >> 11);
            assert_eq!(Helix64::un_xorshift(shifted), x);
        }
    }

    #[test]
    fn test_inverse_step_inverts_forward_step() {
        let mut g = Helix64::new(0xBEEF);
        let before = g.clone();
        g.next_u64();
        g.inverse_step();
        assert_eq!(g, before);
    }

    #[test]
    fn test_next_previous_roundtrip() {
        let mut g = Helix64::new(2024);
        let a = g.next_u64();
        let b = g.next_u64();
        assert_ne!(a, b);
        assert_eq!(g.previous_u64().unwrap(), a);
        let snapshot = g.clone();
        g.previous_u64().unwrap();
        g.next_u64();
        assert_eq!(g, snapshot);
        // After the roundtrip the forward sequence resumes with b.
        assert_eq!(g.next_u64(), b);
    }

    #[test]
    fn test_counter_word_is_pure_weyl() {
        let mut g = Helix64::new(8);
        let d0 = g.state(3).unwrap();
        g.next_u64();
        assert_eq!(g.state(3).unwrap(), d0.wrapping_add(GOLDEN_GAMMA));
    }

    #[test]
    fn test_skip_unsupported() {
        let mut g = Helix64::new(0);
        assert!(matches!(g.skip(4), Err(RngError::Unsupported(_))));
    }
}

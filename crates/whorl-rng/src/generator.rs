//! The generator capability contract and its derived operations.
//!
//! [`Generator`] is the object-safe core: one mandatory primitive
//! (`next_u64`), seeding, state introspection, optional inversion/jump, and
//! state-string serialization. [`GeneratorExt`] layers the full derived API
//! over that primitive with a blanket impl, the same split the rand crate
//! makes between `RngCore` and `Rng`, so every engine gets bounded draws,
//! floats, shuffles, and Gaussians for free.

use crate::dist;
use crate::error::RngError;
use crate::serialize;

/// Object-safe capability contract shared by all whorl PRNG engines.
///
/// Engines are single-threaded, mutable-state objects: every generation
/// call advances the state deterministically, and cloning (or
/// [`boxed_copy`](Generator::boxed_copy)) yields an independent generator
/// whose future sequence matches the original's from the copy point.
pub trait Generator: Send {
    /// Short human-readable algorithm tag used for registry routing.
    fn tag(&self) -> &'static str;

    /// Advance the state and produce the next raw 64-bit output.
    ///
    /// This is the only mandatory primitive; everything in
    /// [`GeneratorExt`] derives from it.
    fn next_u64(&mut self) -> u64;

    /// Reseed in place. Must leave the generator in exactly the state a
    /// fresh construction from `seed` would produce.
    fn set_seed(&mut self, seed: u64);

    /// Number of selectable state words this algorithm exposes.
    fn state_count(&self) -> usize;

    /// Read one state word. Engines without cheap state access return
    /// [`RngError::Unsupported`].
    fn state(&self, index: usize) -> Result<u64, RngError> {
        let _ = index;
        Err(RngError::Unsupported("state"))
    }

    /// Overwrite one state word verbatim, bypassing seed mixing. The
    /// caller accepts responsibility for state quality.
    fn set_state_word(&mut self, index: usize, value: u64) -> Result<(), RngError> {
        let _ = (index, value);
        Err(RngError::Unsupported("set_state_word"))
    }

    /// Step backward and return the output immediately preceding the last
    /// one. `next_u64` followed by `previous_u64` returns the older output,
    /// and `previous_u64` followed by `next_u64` is the identity on state.
    /// Optional; engines without an efficient inverse return
    /// [`RngError::Unsupported`].
    fn previous_u64(&mut self) -> Result<u64, RngError> {
        Err(RngError::Unsupported("previous_u64"))
    }

    /// Jump the state by `delta` steps (negative to rewind) and return the
    /// output at the new position. Optional.
    fn skip(&mut self, delta: i64) -> Result<u64, RngError> {
        let _ = delta;
        Err(RngError::Unsupported("skip"))
    }

    /// Serialize the full state as a backtick-delimited string of state
    /// words in index order.
    fn save_state(&self) -> String {
        let fields: Vec<String> = (0..self.state_count())
            .map(|i| self.state(i).unwrap_or(0).to_string())
            .collect();
        serialize::join_fields(&fields)
    }

    /// Restore state from [`save_state`](Generator::save_state) output.
    /// Missing delimiters or a wrong field count are hard errors; numeric
    /// fields that fail to parse degrade to zero.
    fn load_state(&mut self, text: &str) -> Result<(), RngError> {
        let fields = serialize::split_fields(text)?;
        serialize::expect_fields(&fields, self.state_count())?;
        for (i, field) in fields.iter().enumerate() {
            self.set_state_word(i, serialize::parse_u64(field))?;
        }
        Ok(())
    }

    /// Deep copy with an independent future sequence.
    fn boxed_copy(&self) -> Box<dyn Generator>;
}

/// Derived draws built once over [`Generator::next_u64`].
///
/// Bounded integer draws use the widening multiply-high technique:
/// `(r * bound) >> width`. This is a single multiply with no rejection
/// loop, at the cost of a small bias that shrinks as the bound shrinks
/// relative to the generator width; the bias is intentional and kept for
/// speed.
pub trait GeneratorExt: Generator {
    /// Next 32 bits, taken from the high half of `next_u64`.
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// A uniformly random boolean (sign bit of `next_u64`).
    #[inline]
    fn next_bool(&mut self) -> bool {
        (self.next_u64() as i64) < 0
    }

    /// Uniform draw in `[0, bound)` via multiply-high. `bound == 0`
    /// returns 0.
    #[inline]
    fn next_below_u64(&mut self, bound: u64) -> u64 {
        ((self.next_u64() as u128 * bound as u128) >> 64) as u64
    }

    /// Uniform draw in `[0, bound)` from one 32-bit output.
    #[inline]
    fn next_below_u32(&mut self, bound: u32) -> u32 {
        ((self.next_u32() as u64 * bound as u64) >> 32) as u32
    }

    /// Uniform draw in `[0, bound)`. Any `bound <= 0` returns 0; this
    /// never errors and never loops.
    #[inline]
    fn next_below(&mut self, bound: i64) -> i64 {
        if bound <= 0 {
            0
        } else {
            self.next_below_u64(bound as u64) as i64
        }
    }

    /// Uniform draw in `[0, bound)` where `bound` may be negative, in
    /// which case the result is in `(bound, 0]`.
    #[inline]
    fn next_below_signed(&mut self, bound: i64) -> i64 {
        if bound >= 0 {
            self.next_below(bound)
        } else {
            -(self.next_below_u64(bound.unsigned_abs()) as i64)
        }
    }

    /// Uniform draw in `[inner, outer)`. Degenerate ranges
    /// (`outer <= inner`) return `inner`.
    #[inline]
    fn next_range(&mut self, inner: i64, outer: i64) -> i64 {
        if outer <= inner {
            return inner;
        }
        let span = outer.wrapping_sub(inner) as u64;
        inner.wrapping_add(self.next_below_u64(span) as i64)
    }

    /// Uniform f64 in `[0, 1)` from the top 53 bits.
    #[inline]
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / 9_007_199_254_740_992.0)
    }

    /// Uniform f32 in `[0, 1)` from the top 24 bits.
    #[inline]
    fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 * (1.0 / 16_777_216.0)
    }

    /// Uniform f64 in `(0, 1)`, never exactly 0 or 1.
    ///
    /// Uses the trailing-zero count of the raw output to select the
    /// exponent, which gives full mantissa precision near zero instead of
    /// the fixed 2^-53 grid of [`next_f64`](GeneratorExt::next_f64).
    #[inline]
    fn next_f64_exclusive(&mut self) -> f64 {
        let bits = self.next_u64();
        f64::from_bits((1022u64.wrapping_sub(bits.trailing_zeros() as u64) << 52) | (bits >> 12))
    }

    /// Uniform f32 in `(0, 1)`, never exactly 0 or 1.
    #[inline]
    fn next_f32_exclusive(&mut self) -> f32 {
        let bits = self.next_u64();
        f32::from_bits(
            (126u32.wrapping_sub(bits.trailing_zeros() as u32) << 23) | ((bits >> 41) as u32),
        )
    }

    /// Uniform f64 in `[0, 1]`, both endpoints reachable.
    #[inline]
    fn next_f64_inclusive(&mut self) -> f64 {
        self.next_below_u64((1u64 << 53) + 1) as f64 * (1.0 / 9_007_199_254_740_992.0)
    }

    /// Uniform f32 in `[0, 1]`, both endpoints reachable.
    #[inline]
    fn next_f32_inclusive(&mut self) -> f32 {
        self.next_below_u64((1u64 << 24) + 1) as f32 * (1.0 / 16_777_216.0)
    }

    /// Triangular distribution over `(-1, 1)` centered on 0 (difference of
    /// two uniforms).
    #[inline]
    fn next_triangular(&mut self) -> f64 {
        self.next_f64() - self.next_f64()
    }

    /// Cubed-uniform distribution over `(-1, 1)`, strongly concentrated
    /// near 0.
    #[inline]
    fn next_cubic_triangular(&mut self) -> f64 {
        let u = self.next_f64() * 2.0 - 1.0;
        u * u * u
    }

    /// Standard normal draw: the Ziggurat transform applied to one
    /// `next_u64`.
    #[inline]
    fn next_gaussian(&mut self) -> f64 {
        dist::normal(self.next_u64())
    }

    /// Fisher-Yates shuffle, iterating from the end toward the front and
    /// consuming one bounded draw per swap.
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.next_below_u64(i as u64 + 1) as usize;
            items.swap(i, j);
        }
    }

    /// Index draw weighted by the given non-negative weights. A
    /// non-positive total weight returns 0.
    fn weighted_index(&mut self, weights: &[f64]) -> usize
    where
        Self: Sized,
    {
        let total: f64 = weights.iter().filter(|w| w.is_sign_positive()).sum();
        if !(total > 0.0) {
            return 0;
        }
        let mut target = self.next_f64() * total;
        for (i, &w) in weights.iter().enumerate() {
            if w > 0.0 {
                target -= w;
                if target < 0.0 {
                    return i;
                }
            }
        }
        weights.len().saturating_sub(1)
    }

    /// Minimum of `trials` bounded draws; biases low.
    fn min_of(&mut self, bound: i64, trials: usize) -> i64
    where
        Self: Sized,
    {
        (0..trials.max(1))
            .map(|_| self.next_below(bound))
            .min()
            .unwrap_or(0)
    }

    /// Maximum of `trials` bounded draws; biases high.
    fn max_of(&mut self, bound: i64, trials: usize) -> i64
    where
        Self: Sized,
    {
        (0..trials.max(1))
            .map(|_| self.next_below(bound))
            .max()
            .unwrap_or(0)
    }

    /// Minimum of `trials` uniform f64 draws.
    fn min_f64_of(&mut self, trials: usize) -> f64
    where
        Self: Sized,
    {
        (0..trials.max(1))
            .map(|_| self.next_f64())
            .fold(f64::INFINITY, f64::min)
    }

    /// Maximum of `trials` uniform f64 draws.
    fn max_f64_of(&mut self, trials: usize) -> f64
    where
        Self: Sized,
    {
        (0..trials.max(1))
            .map(|_| self.next_f64())
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

impl<G: Generator + ?Sized> GeneratorExt for G {}

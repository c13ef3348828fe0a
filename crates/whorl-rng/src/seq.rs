//! Low-discrepancy point sequences.
//!
//! Stateful, forward-only iterators producing non-overlapping sample points
//! in N dimensions. They share the determinism requirements of the PRNG
//! engines but are independent of them: the cursor is explicit and
//! resumable, advancing by exactly one per `next_point`.

/// First sixteen primes, the default Halton bases.
const PRIMES: [u32; 16] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53];

/// Common contract for low-discrepancy sequence cursors.
pub trait PointSequence {
    /// Number of coordinates per generated point.
    fn dimension(&self) -> usize;

    /// Advance the cursor by exactly one and write the point into `out`.
    /// Each coordinate lies in `[0, 1)`.
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != dimension()`.
    fn next_point(&mut self, out: &mut [f64]);

    /// Number of points generated so far.
    fn index(&self) -> u64;

    /// Rewind to the initial state.
    fn reset(&mut self);

    /// Advance the cursor by `n` points without producing them.
    fn skip(&mut self, n: u64);
}

/// Halton sequence: per-axis radix-inverse (van der Corput) values of a
/// shared integer index, one pairwise-coprime base per axis.
///
/// Resumable by saving [`index`](PointSequence::index) and restoring with
/// [`set_index`](Halton::set_index); the bases are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Halton {
    bases: Vec<u32>,
    index: u64,
}

impl Halton {
    /// Create a sequence over the first `dimension` primes as bases.
    ///
    /// # Panics
    ///
    /// Panics if `dimension` is 0 or greater than 16.
    pub fn new(dimension: usize) -> Self {
        assert!(
            (1..=PRIMES.len()).contains(&dimension),
            "Halton supports 1..=16 dimensions, got {dimension}"
        );
        Self {
            bases: PRIMES[..dimension].to_vec(),
            index: 0,
        }
    }

    /// Create a sequence over explicit bases. Bases should be pairwise
    /// coprime and at least 2 for the usual discrepancy guarantees; that
    /// is the caller's responsibility.
    pub fn with_bases(bases: Vec<u32>) -> Self {
        assert!(!bases.is_empty(), "Halton needs at least one base");
        assert!(bases.iter().all(|&b| b >= 2), "Halton bases must be >= 2");
        Self { bases, index: 0 }
    }

    /// Restore the cursor to an externally saved position.
    pub fn set_index(&mut self, index: u64) {
        self.index = index;
    }

    /// The per-axis bases.
    pub fn bases(&self) -> &[u32] {
        &self.bases
    }

    /// Radix-inverse of `index` in the given base, in `[0, 1)`.
    fn van_der_corput(base: u32, mut index: u64) -> f64 {
        let base = base as u64;
        let inv = 1.0 / base as f64;
        let mut factor = inv;
        let mut value = 0.0;
        while index > 0 {
            value += (index % base) as f64 * factor;
            index /= base;
            factor *= inv;
        }
        value
    }
}

impl PointSequence for Halton {
    fn dimension(&self) -> usize {
        self.bases.len()
    }

    fn next_point(&mut self, out: &mut [f64]) {
        assert_eq!(out.len(), self.bases.len());
        self.index += 1;
        for (slot, &base) in out.iter_mut().zip(&self.bases) {
            *slot = Self::van_der_corput(base, self.index);
        }
    }

    fn index(&self) -> u64 {
        self.index
    }

    fn reset(&mut self) {
        self.index = 0;
    }

    fn skip(&mut self, n: u64) {
        self.index = self.index.wrapping_add(n);
    }
}

/// R-sequence (additive recurrence over generalized-golden-ratio
/// increments): each axis adds a fixed irrational-derived offset and keeps
/// the fractional part.
///
/// The increments are `1/g, 1/g^2, ..., 1/g^d` where `g` is the unique
/// positive root of `x^(d+1) = x + 1`. Resumable by saving and restoring
/// the current offsets via [`offsets`](RSequence::offsets) /
/// [`set_offsets`](RSequence::set_offsets).
#[derive(Debug, Clone, PartialEq)]
pub struct RSequence {
    alphas: Vec<f64>,
    current: Vec<f64>,
    index: u64,
}

impl RSequence {
    /// Starting offset for every axis; 0.5 gives the best-behaved start.
    const SEED_OFFSET: f64 = 0.5;

    /// Create a sequence of the given dimension.
    ///
    /// # Panics
    ///
    /// Panics if `dimension` is 0.
    pub fn new(dimension: usize) -> Self {
        assert!(dimension > 0, "RSequence needs at least one dimension");
        let gamma = Self::generalized_golden(dimension);
        let mut alphas = Vec::with_capacity(dimension);
        let mut power = 1.0;
        for _ in 0..dimension {
            power /= gamma;
            alphas.push(power.fract());
        }
        Self {
            alphas,
            current: vec![Self::SEED_OFFSET; dimension],
            index: 0,
        }
    }

    /// Unique positive root of `x^(d+1) = x + 1` by fixed-point iteration;
    /// converges quickly for every `d >= 1` (d = 1 gives the golden ratio,
    /// d = 2 the plastic number).
    fn generalized_golden(dimension: usize) -> f64 {
        let exponent = 1.0 / (dimension as f64 + 1.0);
        let mut x = 2.0_f64;
        for _ in 0..64 {
            x = (1.0 + x).powf(exponent);
        }
        x
    }

    /// Current per-axis offsets, for external resume.
    pub fn offsets(&self) -> &[f64] {
        &self.current
    }

    /// Restore externally saved offsets and cursor position.
    ///
    /// # Panics
    ///
    /// Panics if `offsets.len() != dimension()`.
    pub fn set_offsets(&mut self, offsets: &[f64], index: u64) {
        assert_eq!(offsets.len(), self.current.len());
        self.current.copy_from_slice(offsets);
        self.index = index;
    }
}

impl PointSequence for RSequence {
    fn dimension(&self) -> usize {
        self.alphas.len()
    }

    fn next_point(&mut self, out: &mut [f64]) {
        assert_eq!(out.len(), self.current.len());
        self.index += 1;
        for (slot, (cur, &alpha)) in out.iter_mut().zip(self.current.iter_mut().zip(&self.alphas)) {
            *cur = (*cur + alpha).fract();
            *slot = *cur;
        }
    }

    fn index(&self) -> u64 {
        self.index
    }

    fn reset(&mut self) {
        self.current.fill(Self::SEED_OFFSET);
        self.index = 0;
    }

    fn skip(&mut self, n: u64) {
        // Replay the per-point update instead of one fused multiply, so a
        // skip lands on bit-identical offsets to stepping.
        for _ in 0..n {
            for (cur, &alpha) in self.current.iter_mut().zip(&self.alphas) {
                *cur = (*cur + alpha).fract();
            }
        }
        self.index = self.index.wrapping_add(n);
    }
}

//! Distribution transforms: probit approximations and Gaussian samplers.
//!
//! Everything here is a pure function of its inputs. The probit family maps
//! probabilities (or bit patterns reinterpreted as probabilities) through a
//! rational-polynomial inverse normal CDF; [`normal`] is a table-driven
//! Ziggurat sampler over a single 64-bit state; the `rough` variants trade
//! accuracy for a handful of integer operations.

use std::sync::OnceLock;

use crate::mix::{mix64, GOLDEN_GAMMA};

// Rational-polynomial probit (Voutier 2010), three regimes split at
// p = 0.0465 and p = 0.9535. Central region: q = p - 1/2, r = q*q,
// probit ~= q * (A2 + (A1*r + A0) / (r*r + B1*r + B0)). Tail regions use
// r = sqrt(ln(1/p^2)), which stays finite for any p in (0, 1) and tolerates
// out-of-range inputs through the log-of-reciprocal form.
const P_LOW: f64 = 0.0465;
const P_HIGH: f64 = 0.9535;

const A0: f64 = 0.195_740_115_269_792;
const A1: f64 = -0.652_871_358_365_296;
const A2: f64 = 1.246_899_760_652_504;
const B0: f64 = 0.155_331_081_623_168;
const B1: f64 = -0.839_293_158_122_257;

const C0: f64 = 16.682_320_830_719_986;
const C1: f64 = 4.120_411_523_939_115;
const C2: f64 = 0.029_814_187_308_200_21;
const C3: f64 = -1.000_182_518_730_158_1;
const D0: f64 = 7.173_787_663_925_508;
const D1: f64 = 8.759_693_508_958_633;

/// Extreme-tail clamp; roughly probit of the smallest positive double.
const PROBIT_EXTREME: f64 = 38.5;

#[inline]
fn probit_tail(p: f64) -> f64 {
    // Valid for any p in (0, 1/2]; diverges slowly as p approaches 0. The
    // floor keeps p*p clear of subnormal underflow.
    let p = p.max(1e-150);
    let r = (1.0 / (p * p)).ln().sqrt();
    C3 * r + C2 + (C1 * r + C0) / (r * r + D1 * r + D0)
}

/// Inverse cumulative distribution function of the standard normal.
///
/// `probit_f64(0.5)` is exactly 0, and the function is monotone
/// non-decreasing over (0, 1). Inputs outside [0, 1] are tolerated: the
/// tail branches remain finite, and the result is clamped to ±38.5.
pub fn probit_f64(p: f64) -> f64 {
    if p <= 0.0 {
        return -PROBIT_EXTREME;
    }
    if p >= 1.0 {
        return PROBIT_EXTREME;
    }
    let value = if p < P_LOW {
        probit_tail(p)
    } else if p > P_HIGH {
        -probit_tail(1.0 - p)
    } else {
        let q = p - 0.5;
        let r = q * q;
        q * (A2 + (A1 * r + A0) / (r * r + B1 * r + B0))
    };
    value.clamp(-PROBIT_EXTREME, PROBIT_EXTREME)
}

/// Single-precision probit; same polynomial evaluated in f64, rounded once.
pub fn probit_f32(p: f32) -> f32 {
    probit_f64(p as f64) as f32
}

/// Bit-pattern-preserving probit over the full i64 range.
///
/// The input is reinterpreted as a fixed-point fraction in [-0.5, 0.5) and
/// shifted to (0, 1) before the polynomial, so the result is monotone in
/// the input integer.
pub fn probit_i64(bits: i64) -> f64 {
    probit_f64(bits as f64 * (1.0 / 18_446_744_073_709_551_616.0) + 0.5)
}

/// Bit-pattern-preserving probit over the full i32 range.
pub fn probit_i32(bits: i32) -> f32 {
    probit_f64(bits as f64 * (1.0 / 4_294_967_296.0) + 0.5) as f32
}

// Ziggurat tables: 256 layers over the standard normal, built once.
// R and V are the standard 256-layer constants.
const ZIG_LAYERS: usize = 256;
const ZIG_R: f64 = 3.654_152_885_361_008_8;
const ZIG_V: f64 = 0.004_928_673_233_992_336;

struct ZigTables {
    /// Layer right edges; `x[0] = V / f(R)`, `x[1] = R`, ..., `x[256] = 0`.
    x: [f64; ZIG_LAYERS + 1],
    /// Gaussian curve heights at each edge, `f[i] = exp(-x[i]^2 / 2)`.
    f: [f64; ZIG_LAYERS + 1],
}

fn zig_tables() -> &'static ZigTables {
    static TABLES: OnceLock<ZigTables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let mut x = [0.0; ZIG_LAYERS + 1];
        let mut f = [0.0; ZIG_LAYERS + 1];
        let tail_height = (-0.5 * ZIG_R * ZIG_R).exp();
        x[0] = ZIG_V / tail_height;
        x[1] = ZIG_R;
        for i in 2..ZIG_LAYERS {
            let prev = x[i - 1];
            let prev_height = (-0.5 * prev * prev).exp();
            x[i] = (-2.0 * (ZIG_V / prev + prev_height).ln()).sqrt();
        }
        x[ZIG_LAYERS] = 0.0;
        for i in 0..=ZIG_LAYERS {
            f[i] = (-0.5 * x[i] * x[i]).exp();
        }
        ZigTables { x, f }
    })
}

#[inline]
fn remix(state: &mut u64) -> u64 {
    *state = mix64(state.wrapping_add(GOLDEN_GAMMA));
    *state
}

/// Uniform in (0, 1], used where a logarithm of the draw is taken.
#[inline]
fn unit_exclusive_zero(bits: u64) -> f64 {
    ((bits >> 11) + 1) as f64 * (1.0 / 9_007_199_254_740_992.0)
}

/// Ziggurat-algorithm standard normal sampler over one 64-bit state.
///
/// The common case consumes only the given state: low 8 bits pick a layer,
/// bit 8 picks the sign, and the top 53 bits form the uniform. When the
/// draw falls in a wedge or the tail, the state is remixed internally and
/// the rejection loop retries; it terminates with probability 1 (the
/// acceptance region has positive measure at every layer), with no
/// artificial iteration cap. Unlike probit, input bit patterns are not
/// preserved in the output ordering.
pub fn normal(state: u64) -> f64 {
    let t = zig_tables();
    let mut s = state;
    loop {
        let i = (s & 0xFF) as usize;
        let sign = if s & 0x100 != 0 { -1.0 } else { 1.0 };
        let u = (s >> 11) as f64 * (1.0 / 9_007_199_254_740_992.0);
        let x = u * t.x[i];
        if x < t.x[i + 1] {
            return sign * x;
        }
        if i == 0 {
            // Marsaglia tail: sample beyond R.
            loop {
                let a = -unit_exclusive_zero(remix(&mut s)).ln() / ZIG_R;
                let b = -unit_exclusive_zero(remix(&mut s)).ln();
                if b + b >= a * a {
                    return sign * (ZIG_R + a);
                }
            }
        }
        // Wedge: accept with probability proportional to the sliver of
        // Gaussian curve between the layer edges at this x.
        let height = (-0.5 * x * x).exp();
        let v = remix(&mut s) as f64 * (1.0 / 18_446_744_073_709_551_616.0);
        if t.f[i] + v * (t.f[i + 1] - t.f[i]) < height {
            return sign * x;
        }
        remix(&mut s);
    }
}

/// Fast quasi-Gaussian approximation from one 64-bit input.
///
/// Combines a popcount-derived binomial term with two triangular terms
/// taken from the input multiplied by itself. Output is bounded to
/// roughly (-9.4, 9.4); the distribution is visibly stepped in the tails.
pub fn normal_rough(bits: u64) -> f32 {
    let binomial = (bits.count_ones() as f32 - 32.0) * 0.216_506_35;
    let m = bits.wrapping_mul(bits | 1);
    let t1 = ((m >> 32) as u32 as f32 - (m as u32 as f32)) * (1.0 / 4_294_967_296.0);
    let m2 = m.wrapping_mul(m | 1);
    let t2 = ((m2 >> 32) as u32 as f32 - (m2 as u32 as f32)) * (1.0 / 4_294_967_296.0);
    binomial + t1 + t2
}

/// Cruder, cheaper variant of [`normal_rough`] with a single triangular
/// term. Output is bounded to roughly (-9.0, 9.0).
pub fn normal_rougher(bits: u64) -> f32 {
    let binomial = (bits.count_ones() as f32 - 32.0) * 0.25;
    let m = bits.wrapping_mul(bits | 1);
    let t = ((m >> 32) as u32 as f32 - (m as u32 as f32)) * (1.0 / 4_294_967_296.0);
    binomial + t
}

//! Shared lookup tables.
//!
//! Gradient directions and cell feature offsets are drawn once from a
//! fixed-seed generator and shared by every noise instance, so the tables
//! never enter serialized state. 256 entries per dimension keeps the index
//! a plain byte taken from the low bits of a lattice hash.

use std::sync::OnceLock;

use whorl_rng::engines::SplitMix64;
use whorl_rng::GeneratorExt;

/// Entries per table; indices are `hash & 0xFF`.
pub(crate) const TABLE_LEN: usize = 256;

/// Seed for table generation. Changing it changes every field's output.
const TABLE_SEED: u64 = 0x57_48_4F_52_4C_54_41_42;

struct Tables {
    /// Flat unit gradients for dimensions 2..=6; `gradients[d - 2]` holds
    /// `TABLE_LEN * d` floats.
    gradients: [Vec<f64>; 5],
    /// Flat cell feature offsets for dimensions 1..=4; `offsets[d - 1]`
    /// holds `TABLE_LEN * d` floats, each coordinate in `(0.05, 0.95)`.
    offsets: [Vec<f64>; 4],
}

fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let mut rng = SplitMix64::new(TABLE_SEED);
        let gradients = [
            unit_vectors(&mut rng, 2),
            unit_vectors(&mut rng, 3),
            unit_vectors(&mut rng, 4),
            unit_vectors(&mut rng, 5),
            unit_vectors(&mut rng, 6),
        ];
        let offsets = [
            scalar_offsets(&mut rng),
            ball_offsets(&mut rng, 2),
            ball_offsets(&mut rng, 3),
            ball_offsets(&mut rng, 4),
        ];
        Tables { gradients, offsets }
    })
}

/// `TABLE_LEN` unit vectors of the given dimension, flattened.
fn unit_vectors(rng: &mut SplitMix64, dim: usize) -> Vec<f64> {
    let mut flat = Vec::with_capacity(TABLE_LEN * dim);
    let mut v = vec![0.0_f64; dim];
    for _ in 0..TABLE_LEN {
        let norm = loop {
            for slot in v.iter_mut() {
                *slot = rng.next_gaussian();
            }
            let sq: f64 = v.iter().map(|c| c * c).sum();
            if sq > 1e-12 {
                break sq.sqrt();
            }
        };
        flat.extend(v.iter().map(|c| c / norm));
    }
    flat
}

/// 1D feature offsets, uniform across the usable span of the cell.
fn scalar_offsets(rng: &mut SplitMix64) -> Vec<f64> {
    (0..TABLE_LEN).map(|_| 0.05 + 0.9 * rng.next_f64()).collect()
}

/// Feature offsets on a sphere of radius 0.45 around the cell center, so
/// features stay strictly inside their cell and the three-cell scan window
/// remains sufficient.
fn ball_offsets(rng: &mut SplitMix64, dim: usize) -> Vec<f64> {
    unit_vectors(rng, dim)
        .into_iter()
        .map(|c| 0.5 + 0.45 * c)
        .collect()
}

/// Unit gradient for `dim` in 2..=6 at `index`.
pub(crate) fn gradient(dim: usize, index: u8) -> &'static [f64] {
    let flat = &tables().gradients[dim - 2];
    let start = index as usize * dim;
    &flat[start..start + dim]
}

/// Cell feature offset for `dim` in 1..=4 at `index`.
pub(crate) fn cell_offset(dim: usize, index: u8) -> &'static [f64] {
    let flat = &tables().offsets[dim - 1];
    let start = index as usize * dim;
    &flat[start..start + dim]
}

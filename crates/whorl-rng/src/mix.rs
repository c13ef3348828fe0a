//! Integer avalanche mixers and lattice point hashing.
//!
//! These are the bit-level primitives everything else builds on: seed
//! expansion for the PRNG engines and corner/cell hashing for the noise
//! crate. All functions here are pure and deterministic.

/// Weyl increment used for seed expansion and remixing chains.
pub const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Per-axis fold constants for lattice hashing, one per supported axis.
const AXIS: [u64; 7] = [
    0x9E37_79B1_85EB_CA87,
    0xC2B2_AE3D_27D4_EB4F,
    0x1656_67B1_9E37_79F9,
    0x85EB_CA77_C2B2_AE63,
    0x27D4_EB2F_1656_67C5,
    0xA076_1D64_78BD_642F,
    0xE703_7ED1_A0B4_28DB,
];

/// 64-bit avalanche mixer (splitmix64 finalizer).
///
/// A single-bit change in the input flips roughly half the output bits.
#[inline]
pub fn mix64(mut x: u64) -> u64 {
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// 32-bit avalanche mixer (murmur3 finalizer).
#[inline]
pub fn mix32(mut x: u32) -> u32 {
    x = (x ^ (x >> 16)).wrapping_mul(0x85EB_CA6B);
    x = (x ^ (x >> 13)).wrapping_mul(0xC2B2_AE35);
    x ^ (x >> 16)
}

#[inline]
fn fold(seed: u64, coord: i64, axis: usize) -> u64 {
    seed ^ (coord as u64).wrapping_mul(AXIS[axis])
}

/// Hash a 2D lattice point with a seed.
#[inline]
pub fn hash2(x: i64, y: i64, seed: u64) -> u64 {
    mix64(fold(fold(seed, x, 0), y, 1))
}

/// Hash a 3D lattice point with a seed.
#[inline]
pub fn hash3(x: i64, y: i64, z: i64, seed: u64) -> u64 {
    mix64(fold(fold(fold(seed, x, 0), y, 1), z, 2))
}

/// Hash a 4D lattice point with a seed.
#[inline]
pub fn hash4(x: i64, y: i64, z: i64, w: i64, seed: u64) -> u64 {
    mix64(fold(fold(fold(fold(seed, x, 0), y, 1), z, 2), w, 3))
}

/// Hash a 5D lattice point with a seed.
#[inline]
pub fn hash5(x: i64, y: i64, z: i64, w: i64, u: i64, seed: u64) -> u64 {
    mix64(fold(fold(fold(fold(fold(seed, x, 0), y, 1), z, 2), w, 3), u, 4))
}

/// Hash a 6D lattice point with a seed.
#[inline]
pub fn hash6(x: i64, y: i64, z: i64, w: i64, u: i64, v: i64, seed: u64) -> u64 {
    mix64(fold(
        fold(fold(fold(fold(fold(seed, x, 0), y, 1), z, 2), w, 3), u, 4),
        v,
        5,
    ))
}

/// Hash a lattice point of any dimension up to 7.
///
/// Agrees bit-for-bit with the fixed-arity hashes for matching inputs.
///
/// # Panics
///
/// Panics if `coords` has more than 7 entries.
#[inline]
pub fn hash_nd(coords: &[i64], seed: u64) -> u64 {
    let mut acc = seed;
    for (axis, &c) in coords.iter().enumerate() {
        acc = fold(acc, c, axis);
    }
    mix64(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_arity_matches_generalized() {
        let seed = 0xDEAD_BEEF_CAFE_F00D;
        assert_eq!(hash2(3, -7, seed), hash_nd(&[3, -7], seed));
        assert_eq!(hash3(3, -7, 11, seed), hash_nd(&[3, -7, 11], seed));
        assert_eq!(hash4(3, -7, 11, 0, seed), hash_nd(&[3, -7, 11, 0], seed));
        assert_eq!(
            hash5(3, -7, 11, 0, -2, seed),
            hash_nd(&[3, -7, 11, 0, -2], seed)
        );
        assert_eq!(
            hash6(3, -7, 11, 0, -2, 9, seed),
            hash_nd(&[3, -7, 11, 0, -2, 9], seed)
        );
    }

    #[test]
    fn test_mix64_avalanche() {
        // Flipping one input bit should flip a substantial number of output
        // bits; 16 is a loose floor for a 64-bit avalanche function.
        let base = mix64(0x1234_5678_9ABC_DEF0);
        for bit in 0..64 {
            let flipped = mix64(0x1234_5678_9ABC_DEF0 ^ (1u64 << bit));
            let differing = (base ^ flipped).count_ones();
            assert!(differing >= 16, "bit {} only flipped {}", bit, differing);
        }
    }

    #[test]
    fn test_mix32_avalanche() {
        let base = mix32(0x1234_5678);
        for bit in 0..32 {
            let flipped = mix32(0x1234_5678 ^ (1u32 << bit));
            let differing = (base ^ flipped).count_ones();
            assert!(differing >= 8, "bit {} only flipped {}", bit, differing);
        }
    }

    #[test]
    fn test_hash_depends_on_seed_and_each_axis() {
        let h = hash3(1, 2, 3, 99);
        assert_ne!(h, hash3(1, 2, 3, 100));
        assert_ne!(h, hash3(2, 2, 3, 99));
        assert_ne!(h, hash3(1, 3, 3, 99));
        assert_ne!(h, hash3(1, 2, 4, 99));
        // Axis order matters: (1, 2) and (2, 1) hash differently.
        assert_ne!(hash2(1, 2, 99), hash2(2, 1, 99));
    }
}

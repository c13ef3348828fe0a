//! Deterministic continuous noise over N-dimensional space.
//!
//! Three algorithm families ship behind the common [`Noise`] contract:
//! gradient (Perlin-family) noise for 2 to 6 dimensions, lattice-free cyclic
//! noise for 2 to 7, and cellular (Worley) noise for 1 to 4 with a choice of
//! [`CellReturn`] policies. A [`FractalNoise`] wrapper layers octaves over
//! any of them, and the [`registry`] routes tagged state strings back to
//! live fields the same way `whorl-rng` does for generators.
//!
//! All outputs land in `[-1.0, 1.0]` and are fully determined by seed and
//! sample point.
//!
//! ```
//! use whorl_noise::{GradientNoise, Noise};
//!
//! let field = GradientNoise::new(42);
//! let a = field.sample(&[0.3, 1.7]);
//! let b = field.sample(&[0.3, 1.7]);
//! assert_eq!(a, b);
//! assert!((-1.0..=1.0).contains(&a));
//! ```

pub mod cellular;
pub mod contract;
pub mod cyclic;
pub mod error;
pub mod fractal;
pub mod gradient;
pub mod registry;
mod tables;

pub use cellular::{CellReturn, CellularNoise};
pub use contract::{Noise, MAX_DIMENSION};
pub use cyclic::CyclicNoise;
pub use error::NoiseError;
pub use fractal::FractalNoise;
pub use gradient::GradientNoise;

/// Implements serde (de)serialization through the canonical tagged state
/// string, matching the generator convention in `whorl-rng`.
#[cfg(feature = "serde")]
macro_rules! impl_serde_via_state {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                use $crate::contract::Noise;
                serializer.serialize_str(&whorl_rng::serialize::tag_payload(
                    self.tag(),
                    &self.save_state(),
                ))
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                use $crate::contract::Noise;
                let text = String::deserialize(deserializer)?;
                let (tag, payload) = whorl_rng::serialize::split_tagged(&text)
                    .map_err(serde::de::Error::custom)?;
                let mut out = <$ty>::default();
                if tag != out.tag() {
                    return Err(serde::de::Error::custom(format!(
                        "expected tag `{}`, found `{}`",
                        out.tag(),
                        tag
                    )));
                }
                out.load_state(payload).map_err(serde::de::Error::custom)?;
                Ok(out)
            }
        }
    };
}

#[cfg(feature = "serde")]
impl_serde_via_state!(GradientNoise);
#[cfg(feature = "serde")]
impl_serde_via_state!(CyclicNoise);
#[cfg(feature = "serde")]
impl_serde_via_state!(CellularNoise);
#[cfg(feature = "serde")]
impl_serde_via_state!(FractalNoise<GradientNoise>);

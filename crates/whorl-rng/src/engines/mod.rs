//! Concrete PRNG engines.
//!
//! Each engine is a small fixed tuple of state words with its own
//! transition schedule. All of them implement [`Generator`], `Clone`, and
//! the rand-core traits ([`rand::RngCore`] / [`rand::SeedableRng`]) so they
//! drop into rand-ecosystem APIs unchanged.
//!
//! [`Generator`]: crate::generator::Generator

mod coil;
mod helix;
mod splitmix;
mod strand;

pub use coil::Coil32;
pub use helix::Helix64;
pub use splitmix::SplitMix64;
pub use strand::Strand64;

/// Implements the rand-core traits by delegating to the engine's
/// [`Generator`](crate::generator::Generator) impl.
macro_rules! impl_rand_core {
    ($ty:ident) => {
        impl rand::RngCore for $ty {
            #[inline]
            fn next_u32(&mut self) -> u32 {
                $crate::generator::GeneratorExt::next_u32(self)
            }

            #[inline]
            fn next_u64(&mut self) -> u64 {
                $crate::generator::Generator::next_u64(self)
            }

            fn fill_bytes(&mut self, dest: &mut [u8]) {
                let mut chunks = dest.chunks_exact_mut(8);
                for chunk in &mut chunks {
                    let bytes = $crate::generator::Generator::next_u64(self).to_le_bytes();
                    chunk.copy_from_slice(&bytes);
                }
                let rem = chunks.into_remainder();
                if !rem.is_empty() {
                    let bytes = $crate::generator::Generator::next_u64(self).to_le_bytes();
                    let len = rem.len();
                    rem.copy_from_slice(&bytes[..len]);
                }
            }

            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
                self.fill_bytes(dest);
                Ok(())
            }
        }

        impl rand::SeedableRng for $ty {
            type Seed = [u8; 8];

            fn from_seed(seed: Self::Seed) -> Self {
                Self::new(u64::from_le_bytes(seed))
            }

            fn seed_from_u64(seed: u64) -> Self {
                Self::new(seed)
            }
        }
    };
}

/// Implements serde (de)serialization through the canonical tagged state
/// string, so any external persistence framework sees one flat string.
#[cfg(feature = "serde")]
macro_rules! impl_serde_via_state {
    ($ty:ident) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                use $crate::generator::Generator;
                serializer
                    .serialize_str(&$crate::serialize::tag_payload(self.tag(), &self.save_state()))
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                use $crate::generator::Generator;
                let text = String::deserialize(deserializer)?;
                let (tag, payload) =
                    $crate::serialize::split_tagged(&text).map_err(serde::de::Error::custom)?;
                let mut out = Self::default();
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
pub(crate) use impl_serde_via_state;
pub(crate) use impl_rand_core;

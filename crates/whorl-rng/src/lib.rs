//! whorl deterministic pseudo-random generation.
//!
//! This crate is the PRNG half of whorl: seeded generator engines behind a
//! common capability contract, pure distribution transforms, and
//! low-discrepancy point sequences. Everything is bit-reproducible across
//! runs given the same seed and inputs.
//!
//! # Layout
//!
//! - [`mix`]: integer avalanche mixers and lattice point hashing
//! - [`generator`]: the [`Generator`](generator::Generator) contract and
//!   the [`GeneratorExt`](generator::GeneratorExt) derived API
//! - [`engines`]: concrete algorithms (counter-based and multi-word
//!   rotate/xor ciphers)
//! - [`dist`]: probit approximations, the Ziggurat Gaussian sampler, and
//!   fast rough normals
//! - [`seq`]: Halton and R-sequence low-discrepancy cursors
//! - [`serialize`]: the backtick/tilde state-string codec
//! - [`registry`]: process-wide tag-to-factory routing for generators
//!
//! # Example
//!
//! ```
//! use whorl_rng::engines::Helix64;
//! use whorl_rng::generator::{Generator, GeneratorExt};
//!
//! let mut rng = Helix64::new(42);
//! let roll = rng.next_below(6) + 1;
//! assert!((1..=6).contains(&roll));
//!
//! // Copies run in lockstep with the original.
//! let mut copy = rng.clone();
//! assert_eq!(copy.next_u64(), rng.next_u64());
//! ```
//!
//! # Determinism and threading
//!
//! Generators and sequence cursors are single-threaded mutable objects;
//! clone one per consumer instead of sharing. No operation here performs
//! I/O or blocks.

pub mod dist;
pub mod engines;
pub mod error;
pub mod generator;
pub mod mix;
pub mod registry;
pub mod seq;
pub mod serialize;

pub use engines::{Coil32, Helix64, SplitMix64, Strand64};
pub use error::RngError;
pub use generator::{Generator, GeneratorExt};
pub use seq::{Halton, PointSequence, RSequence};

//! Process-wide registry of noise algorithms keyed by tag.
//!
//! Mirrors the generator registry in `whorl-rng`: tags map to factories for
//! default instances, registration is idempotent with a non-fatal diagnostic
//! on duplicates, and tag-prefixed state strings route back to live fields.

use std::collections::BTreeMap;
use std::sync::{Mutex, OnceLock};

use whorl_rng::serialize;

use crate::cellular::CellularNoise;
use crate::contract::Noise;
use crate::cyclic::CyclicNoise;
use crate::error::NoiseError;
use crate::fractal::FractalNoise;
use crate::gradient::GradientNoise;

/// Zero-argument constructor for a default instance of one algorithm.
pub type NoiseFactory = fn() -> Box<dyn Noise>;

fn registry() -> &'static Mutex<BTreeMap<String, NoiseFactory>> {
    static REGISTRY: OnceLock<Mutex<BTreeMap<String, NoiseFactory>>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut map: BTreeMap<String, NoiseFactory> = BTreeMap::new();
        map.insert(GradientNoise::TAG.into(), || {
            Box::new(GradientNoise::default())
        });
        map.insert(CyclicNoise::TAG.into(), || Box::new(CyclicNoise::new(0)));
        map.insert(CellularNoise::TAG.into(), || {
            Box::new(CellularNoise::new(0))
        });
        map.insert(FractalNoise::<GradientNoise>::TAG.into(), || {
            Box::new(FractalNoise::new(GradientNoise::default()))
        });
        Mutex::new(map)
    })
}

/// Register an additional algorithm under `tag`.
///
/// Registration is idempotent; a tag that is already taken keeps its first
/// factory and logs a warning rather than failing.
pub fn register(tag: &str, factory: NoiseFactory) {
    let mut map = registry().lock().expect("noise registry poisoned");
    if map.contains_key(tag) {
        tracing::warn!(tag, "duplicate noise registration ignored");
        return;
    }
    map.insert(tag.to_owned(), factory);
}

/// Construct a default instance of the algorithm registered under `tag`.
pub fn create(tag: &str) -> Result<Box<dyn Noise>, NoiseError> {
    let map = registry().lock().expect("noise registry poisoned");
    map.get(tag)
        .map(|factory| factory())
        .ok_or_else(|| NoiseError::UnknownTag(tag.to_owned()))
}

/// All registered tags, sorted.
pub fn tags() -> Vec<String> {
    let map = registry().lock().expect("noise registry poisoned");
    map.keys().cloned().collect()
}

/// Serialize a noise field as its tag-prefixed state string.
pub fn serialize(noise: &dyn Noise) -> String {
    serialize::tag_payload(noise.tag(), &noise.save_state())
}

/// Reconstruct a noise field from a tag-prefixed state string.
pub fn deserialize(text: &str) -> Result<Box<dyn Noise>, NoiseError> {
    let (tag, payload) = serialize::split_tagged(text)?;
    let mut noise = create(tag)?;
    noise.load_state(payload)?;
    Ok(noise)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tags_present() {
        let tags = tags();
        for expected in ["Cellular", "Cyclic", "Fractal", "Gradient"] {
            assert!(tags.iter().any(|t| t == expected), "missing {expected}");
        }
    }

    #[test]
    fn test_unknown_tag_is_hard_error() {
        assert!(matches!(
            create("NoSuchNoise"),
            Err(NoiseError::UnknownTag(_))
        ));
        assert!(matches!(
            deserialize("NoSuchNoise`1~2`"),
            Err(NoiseError::UnknownTag(_))
        ));
    }

    #[test]
    fn test_duplicate_registration_keeps_first() {
        register("Gradient", || Box::new(CyclicNoise::new(0)));
        let n = create("Gradient").unwrap();
        assert_eq!(n.tag(), "Gradient");
    }
}

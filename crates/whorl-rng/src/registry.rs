//! Process-wide registry of generator algorithms keyed by tag.
//!
//! The registry maps each short algorithm tag to a factory producing a
//! default instance, and routes tag-prefixed state strings back to a live
//! generator. It is initialized once with every built-in engine; further
//! registration is idempotent, and a duplicate tag keeps the first entry
//! and emits a non-fatal diagnostic.

use std::collections::BTreeMap;
use std::sync::{Mutex, OnceLock};

use crate::engines::{Coil32, Helix64, SplitMix64, Strand64};
use crate::error::RngError;
use crate::generator::Generator;
use crate::serialize;

/// Zero-argument constructor for a default instance of one algorithm.
pub type GeneratorFactory = fn() -> Box<dyn Generator>;

fn registry() -> &'static Mutex<BTreeMap<String, GeneratorFactory>> {
    static REGISTRY: OnceLock<Mutex<BTreeMap<String, GeneratorFactory>>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut map: BTreeMap<String, GeneratorFactory> = BTreeMap::new();
        map.insert("SplitMix64".into(), || Box::new(SplitMix64::default()));
        map.insert("Coil32".into(), || Box::new(Coil32::default()));
        map.insert("Strand64".into(), || Box::new(Strand64::default()));
        map.insert("Helix64".into(), || Box::new(Helix64::default()));
        Mutex::new(map)
    })
}

/// Register an additional algorithm under `tag`.
///
/// Registration is idempotent; a tag that is already taken keeps its first
/// factory and logs a warning rather than failing.
pub fn register(tag: &str, factory: GeneratorFactory) {
    let mut map = registry().lock().expect("generator registry poisoned");
    if map.contains_key(tag) {
        tracing::warn!(tag, "duplicate generator registration ignored");
        return;
    }
    map.insert(tag.to_owned(), factory);
}

/// Construct a default instance of the algorithm registered under `tag`.
pub fn create(tag: &str) -> Result<Box<dyn Generator>, RngError> {
    let map = registry().lock().expect("generator registry poisoned");
    map.get(tag)
        .map(|factory| factory())
        .ok_or_else(|| RngError::UnknownTag(tag.to_owned()))
}

/// All registered tags, sorted.
pub fn tags() -> Vec<String> {
    let map = registry().lock().expect("generator registry poisoned");
    map.keys().cloned().collect()
}

/// Serialize a generator as its tag-prefixed state string.
pub fn serialize(generator: &dyn Generator) -> String {
    serialize::tag_payload(generator.tag(), &generator.save_state())
}

/// Reconstruct a generator from a tag-prefixed state string.
pub fn deserialize(text: &str) -> Result<Box<dyn Generator>, RngError> {
    let (tag, payload) = serialize::split_tagged(text)?;
    let mut generator = create(tag)?;
    generator.load_state(payload)?;
    Ok(generator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GeneratorExt;

    #[test]
    fn test_builtin_tags_present() {
        let tags = tags();
        for expected in ["Coil32", "Helix64", "SplitMix64", "Strand64"] {
            assert!(tags.iter().any(|t| t == expected), "missing {expected}");
        }
    }

    #[test]
    fn test_unknown_tag_is_hard_error() {
        assert!(matches!(
            create("NoSuchEngine"),
            Err(RngError::UnknownTag(_))
        ));
        assert!(matches!(
            deserialize("NoSuchEngine`1~2`"),
            Err(RngError::UnknownTag(_))
        ));
    }

    #[test]
    fn test_roundtrip_preserves_sequence() {
        for tag in tags() {
            let mut original = create(&tag).unwrap();
            original.set_seed(0xA5A5_5A5A);
            // Advance a bit so the state is mid-sequence.
            for _ in 0..13 {
                original.next_u64();
            }
            let text = serialize(original.as_ref());
            let mut restored = deserialize(&text).unwrap();
            for _ in 0..64 {
                assert_eq!(restored.next_u64(), original.next_u64(), "tag {tag}");
            }
        }
    }

    #[test]
    fn test_duplicate_registration_keeps_first() {
        register("SplitMix64", || Box::new(crate::engines::Helix64::default()));
        let g = create("SplitMix64").unwrap();
        assert_eq!(g.tag(), "SplitMix64");
    }

    #[test]
    fn test_derived_draws_work_through_dyn() {
        let mut g = create("Helix64").unwrap();
        let v = g.next_below(10);
        assert!((0..10).contains(&v));
        assert!((0.0..1.0).contains(&g.next_f64()));
    }
}

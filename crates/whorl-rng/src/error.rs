//! Error types for the generator contract and state-string handling.

use thiserror::Error;

/// Errors produced by the generator contract, the state-string codec, and
/// the generator registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RngError {
    /// An optional capability the concrete algorithm does not implement.
    ///
    /// This is a policy signal, not a bug; callers should consult the
    /// relevant capability query (`state_count`, engine docs) first.
    #[error("operation `{0}` is not supported by this generator")]
    Unsupported(&'static str),

    /// A state word index outside `0..state_count()`.
    #[error("state index {index} out of range (generator has {count} state words)")]
    StateIndex {
        /// The requested index.
        index: usize,
        /// The number of selectable state words.
        count: usize,
    },

    /// A serialized state string missing its backtick delimiters, or with
    /// the wrong number of fields. Individual numeric fields that fail to
    /// parse are NOT an error; they degrade to zero.
    #[error("malformed state string: {0}")]
    MalformedState(String),

    /// A registry lookup for a tag nothing was registered under.
    #[error("no algorithm registered under tag `{0}`")]
    UnknownTag(String),
}

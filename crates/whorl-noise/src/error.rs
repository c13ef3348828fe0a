//! Error taxonomy for the noise crate.

use thiserror::Error;
use whorl_rng::RngError;

/// Errors surfaced by noise construction, sampling, and state restore.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoiseError {
    /// A sample point's length falls outside the algorithm's supported range.
    #[error("dimension {dimension} outside supported range {min}..={max}")]
    UnsupportedDimension {
        dimension: usize,
        min: usize,
        max: usize,
    },

    /// A state string was structurally invalid (bad delimiters or field count).
    #[error("malformed state string: {0}")]
    MalformedState(String),

    /// No noise algorithm is registered under the given tag.
    #[error("no noise algorithm registered under tag `{0}`")]
    UnknownTag(String),
}

impl From<RngError> for NoiseError {
    fn from(err: RngError) -> Self {
        match err {
            RngError::MalformedState(msg) => NoiseError::MalformedState(msg),
            RngError::UnknownTag(tag) => NoiseError::UnknownTag(tag),
            other => NoiseError::MalformedState(other.to_string()),
        }
    }
}

//! The error surface of the crate.
//!
//! Every failure is deterministic and reported before any computation
//! starts; there are no transient or retryable errors.

use thiserror::Error;

/// Errors reported by model construction, queries, and persistence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeSearchError {
    /// A rejected combination of build options.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A malformed `[min, max]` interval.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// An empty, ragged, or mismatched point set.
    #[error("invalid point set: {0}")]
    Dataset(String),

    /// A model that could not be encoded.
    #[error("failed to encode model: {0}")]
    Serialization(String),

    /// A persisted model that could not be decoded.
    ///
    /// Surfaced distinctly from [`Config`](Self::Config) so that callers can
    /// choose to rebuild from raw data instead.
    #[error("failed to decode model: {0}")]
    Deserialization(String),

    /// A filesystem failure while saving or loading a model or results.
    #[error("i/o error: {0}")]
    Io(String),
}

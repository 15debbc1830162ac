//! Error types for gapforge operations.
//!
//! Defines error types for the two subsystems:
//! - Response decoding (terminal failures for the whole batch)
//! - Per-item validation (recoverable skips carried as diagnostics)

use thiserror::Error;

/// Errors that can occur while decoding a raw model response.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The response could not be parsed as JSON even after the repair
    /// pipeline ran. Carries both the original and the last-repaired text
    /// so callers can show what was attempted.
    #[error("model response is not valid JSON even after repair: {source}")]
    Malformed {
        original: String,
        repaired: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response parsed, but the top-level value is neither an array
    /// nor an object.
    #[error("expected a JSON array or object at the top level, found {found}")]
    UnexpectedShape { found: &'static str },
}

/// Reasons an individual item was skipped during decoding.
///
/// Skips are recoverable: the rest of the batch still decodes and renders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("item is not a JSON object")]
    NotAnObject,

    #[error("item fields do not match the expected shape: {0}")]
    InvalidFields(String),

    #[error("item has no blanks and no {{blank}} marker in its text")]
    NoBlanks,
}

//! Error types for the fallible element-access and conversion operators.
//!
//! Most operators signal absence with `Option`. The `try_*` variants use
//! [`SeqError`] when the caller needs to know *why* no value came back.

use thiserror::Error;

/// Errors reported by the `try_*` operators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeqError {
    /// No element matched.
    #[error("sequence contains no matching element")]
    NotFound,

    /// More than one element matched where exactly one was expected.
    #[error("sequence contains more than one matching element")]
    Ambiguous,

    /// A key selector produced a key that was already present.
    #[error("duplicate key produced by element at index {index}")]
    DuplicateKey { index: usize },
}

/// Result type for sequence operations.
pub type Result<T> = std::result::Result<T, SeqError>;

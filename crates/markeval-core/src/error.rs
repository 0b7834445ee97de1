//! Error types for markup evaluation operations.

use std::path::PathBuf;
use thiserror::Error;

/// Error types that can occur while reading documents or scoring markup
/// placement.
#[derive(Error, Debug)]
pub enum MarkevalError {
    /// A document could not be opened or parsed.
    ///
    /// Carries the offending path so callers can report which of the two
    /// input documents failed. Not recoverable within the core.
    #[error("failed to read document {}: {reason}", path.display())]
    DocumentRead {
        /// Path of the document that failed to load
        path: PathBuf,
        /// Human-readable parse/open failure description
        reason: String,
    },

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An aggregate scoring invariant was violated.
    ///
    /// `correct + missed == gt_total` and `correct + misplaced == eval_total`
    /// must hold for every run; a violation signals a defect in the scoring
    /// engine itself and must never be surfaced as a user-facing result.
    #[error("internal consistency fault: {0}")]
    Consistency(String),
}

impl MarkevalError {
    /// Build a `DocumentRead` error for `path`.
    pub fn document_read(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DocumentRead {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Type alias for [`Result<T, MarkevalError>`].
pub type Result<T> = std::result::Result<T, MarkevalError>;

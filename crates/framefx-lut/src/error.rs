//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur while building or parsing a LUT.
///
/// I/O failures and malformed content are separate variants so callers
/// can decide to fall back to an identity transform on a bad file while
/// still surfacing missing-file problems. Lookups themselves never fail:
/// index clamping keeps the per-pixel path infallible.
#[derive(Debug, Error)]
pub enum LutError {
    /// Invalid table size or shape.
    #[error("invalid LUT size: {0}")]
    InvalidSize(String),

    /// Malformed LUT file content.
    #[error("format error at line {line}: {msg}")]
    Format {
        /// 1-based line number of the offending line.
        line: usize,
        /// Description of the problem.
        msg: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LutError {
    /// Creates a [`LutError::Format`] error.
    #[inline]
    pub fn format(line: usize, msg: impl Into<String>) -> Self {
        Self::Format {
            line,
            msg: msg.into(),
        }
    }
}

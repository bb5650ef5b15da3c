//! Error types for frame operations.

use framefx_lut::LutError;
use thiserror::Error;

/// Error type for frame operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// LUT loading or parsing failed.
    #[error(transparent)]
    Lut(#[from] LutError),
}

/// Result type for frame operations.
pub type OpsResult<T> = Result<T, OpsError>;

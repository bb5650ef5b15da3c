//! # framefx-lut
//!
//! Color Look-Up Table (LUT) engine for video frame grading.
//!
//! This crate provides the in-memory LUT structures and the `.cube` file
//! parser used to remap frame colors. Inputs and outputs are 8-bit RGB
//! colors; table samples are kept as `f32` internally so interpolation
//! stays full-precision until the final round-and-clamp.
//!
//! # LUT Types
//!
//! - [`Lut1D`] - independent per-channel curves (3x1D)
//! - [`Lut3D`] - full RGB cube with trilinear interpolation
//! - [`Lut`] - the variant callers consume; the parser picks the shape
//!
//! # Usage
//!
//! ```rust,ignore
//! use framefx_lut::cube;
//!
//! let lut = cube::read("grade.cube")?;
//! let out = lut.lookup(framefx_lut::Rgb::new(128, 64, 32));
//! ```
//!
//! # Errors
//!
//! [`LutError::Io`] (missing/unreadable file) and
//! [`LutError::Format`] (malformed content, with the offending line) are
//! distinct variants, so callers can fall back to [`Lut::identity`] on a
//! bad file while still surfacing I/O problems.
//!
//! # Used By
//!
//! - `framefx-ops` - per-pixel frame application and LUT caching

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod color;
mod lut;
mod lut1d;
mod lut3d;
mod error;
pub mod cube;

pub use color::Rgb;
pub use lut::Lut;
pub use lut1d::Lut1D;
pub use lut3d::Lut3D;
pub use error::{LutError, LutResult};
pub use cube::{read as read_cube, write_1d as write_cube_1d, write_3d as write_cube_3d};

//! # framefx-ops
//!
//! Per-pixel LUT application for video frame buffers.
//!
//! This crate drives a [`framefx_lut::Lut`] over packed RGBA8 pixel
//! buffers, one frame at a time, and caches parsed LUTs so a table is
//! built once per file rather than once per frame.
//!
//! # Modules
//!
//! - [`frame`] - the in-place per-pixel transform loop
//! - [`cache`] - path-keyed, mtime-aware LUT memoization
//!
//! # Example
//!
//! ```rust,ignore
//! use framefx_ops::{cache::LutCache, frame};
//!
//! let cache = LutCache::new();
//! let lut = cache.get_or_load("grade.cube")?;
//! frame::apply_with_intensity(&mut pixels, width, height, &lut, 0.8)?;
//! ```
//!
//! # Parallelism
//!
//! The `parallel` feature (default) processes pixel rows on rayon
//! workers. Every pixel depends only on itself and the shared read-only
//! table, so parallel and sequential runs are byte-identical.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod cache;
pub mod frame;

pub use error::{OpsError, OpsResult};

//! 1-dimensional lookup table.
//!
//! A 1D LUT applies an independent curve to each color channel (a
//! "3x1D" transform). It cannot express cross-channel grading; that is
//! what [`crate::Lut3D`] is for.

use crate::color::{Rgb, quantize};
use crate::{LutError, LutResult};

/// A 1-dimensional lookup table with one sample curve per channel.
///
/// # Structure
///
/// - `N + 1` samples per channel spanning `N` equal-width sub-intervals
///   of the input domain (`N >= 1`)
/// - Samples and domain are in the engine's 0..=255 scale
/// - Linear interpolation between samples; inputs at or beyond the
///   domain edges clamp to the end samples
///
/// # Example
///
/// ```rust
/// use framefx_lut::{Lut1D, Rgb};
///
/// let lut = Lut1D::identity();
/// assert_eq!(lut.lookup(Rgb::new(12, 130, 255)), Rgb::new(12, 130, 255));
/// ```
#[derive(Debug, Clone)]
pub struct Lut1D {
    r: Vec<f32>,
    g: Vec<f32>,
    b: Vec<f32>,
    domain_min: [f32; 3],
    domain_max: [f32; 3],
}

impl Lut1D {
    /// Creates an identity (pass-through) table: the two-sample
    /// `{0, 255}` curve per channel over the full [0, 255] domain.
    pub fn identity() -> Self {
        Self {
            r: vec![0.0, 255.0],
            g: vec![0.0, 255.0],
            b: vec![0.0, 255.0],
            domain_min: [0.0; 3],
            domain_max: [255.0; 3],
        }
    }

    /// Creates a table from per-channel samples in the 0..=255 scale.
    ///
    /// All three channels must hold the same number of samples, at least
    /// two, and the domain must have non-zero width on every axis.
    pub fn from_channels(
        r: Vec<f32>,
        g: Vec<f32>,
        b: Vec<f32>,
        domain_min: [f32; 3],
        domain_max: [f32; 3],
    ) -> LutResult<Self> {
        if r.len() < 2 {
            return Err(LutError::InvalidSize(format!(
                "1D LUT needs at least 2 samples per channel, got {}",
                r.len()
            )));
        }
        if r.len() != g.len() || r.len() != b.len() {
            return Err(LutError::InvalidSize(format!(
                "channel sample counts differ: {}/{}/{}",
                r.len(),
                g.len(),
                b.len()
            )));
        }
        for axis in 0..3 {
            if domain_max[axis] - domain_min[axis] == 0.0 {
                return Err(LutError::InvalidSize(format!(
                    "zero-width domain on axis {axis}"
                )));
            }
        }
        Ok(Self {
            r,
            g,
            b,
            domain_min,
            domain_max,
        })
    }

    /// Number of samples per channel.
    #[inline]
    pub fn size(&self) -> usize {
        self.r.len()
    }

    /// Per-channel sample tables, 0..=255 scale.
    pub fn channels(&self) -> (&[f32], &[f32], &[f32]) {
        (&self.r, &self.g, &self.b)
    }

    /// Input domain as `(min, max)` per channel, 0..=255 scale.
    pub fn domain(&self) -> ([f32; 3], [f32; 3]) {
        (self.domain_min, self.domain_max)
    }

    /// Maps a color through the table, one channel at a time.
    pub fn lookup(&self, rgb: Rgb) -> Rgb {
        Rgb::new(
            quantize(self.interpolate(&self.r, 0, rgb.r as f32)),
            quantize(self.interpolate(&self.g, 1, rgb.g as f32)),
            quantize(self.interpolate(&self.b, 2, rgb.b as f32)),
        )
    }

    /// Linear interpolation along one channel's sample table.
    fn interpolate(&self, table: &[f32], axis: usize, source: f32) -> f32 {
        let n = (table.len() - 1) as f32;
        let interval_width = (self.domain_max[axis] - self.domain_min[axis]) / n;
        let i = (source - self.domain_min[axis]) / interval_width;

        // An input exactly at domain_max lands on the last sample; the
        // naive ceil would index one past it. Both indices clamp to the
        // table, which also pins out-of-domain inputs to the end values.
        let i0 = (i.floor().max(0.0) as usize).min(table.len() - 1);
        let i1 = (i.ceil().max(0.0) as usize).min(table.len() - 1);
        debug_assert!(i0 < table.len() && i1 < table.len());

        if i0 == i1 {
            return table[i0];
        }
        (table[i1] - table[i0]).mul_add(i - i0 as f32, table[i0])
    }
}

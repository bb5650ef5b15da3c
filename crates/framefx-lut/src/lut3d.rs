//! 3-dimensional lookup table.
//!
//! A 3D LUT maps RGB input to RGB output through a cube of color
//! samples, so all three input channels shape every output channel.
//! This is the shape that expresses cross-channel grades a per-channel
//! table cannot.

use crate::color::{Rgb, quantize};
use crate::{LutError, LutResult};

/// A 3-dimensional lookup table.
///
/// # Structure
///
/// - `size^3` samples, each an RGB output in the 0..=255 scale
/// - Stored R-fastest (`index = r + g*size + b*size^2`), the same order
///   `.cube` files list their rows
/// - Trilinear interpolation across the 8 surrounding cell corners
///
/// # Example
///
/// ```rust
/// use framefx_lut::{Lut3D, Rgb};
///
/// let lut = Lut3D::identity(17);
/// assert_eq!(lut.lookup(Rgb::new(128, 64, 32)), Rgb::new(128, 64, 32));
/// ```
#[derive(Debug, Clone)]
pub struct Lut3D {
    data: Vec<[f32; 3]>,
    size: usize,
    domain_min: [f32; 3],
    domain_max: [f32; 3],
}

impl Lut3D {
    /// Creates an identity (pass-through) cube of the given edge size.
    pub fn identity(size: usize) -> Self {
        let last = (size - 1) as f32;
        let mut data = Vec::with_capacity(size * size * size);
        for b in 0..size {
            for g in 0..size {
                for r in 0..size {
                    data.push([
                        r as f32 / last * 255.0,
                        g as f32 / last * 255.0,
                        b as f32 / last * 255.0,
                    ]);
                }
            }
        }
        Self {
            data,
            size,
            domain_min: [0.0; 3],
            domain_max: [255.0; 3],
        }
    }

    /// Creates a cube from raw samples in the 0..=255 scale.
    ///
    /// `data` must hold exactly `size^3` entries in R-fastest order, and
    /// `size` must be at least 2.
    pub fn from_data(data: Vec<[f32; 3]>, size: usize) -> LutResult<Self> {
        if size < 2 {
            return Err(LutError::InvalidSize(format!(
                "3D LUT edge must be at least 2, got {size}"
            )));
        }
        let expected = size * size * size;
        if data.len() != expected {
            return Err(LutError::InvalidSize(format!(
                "expected {} entries for size {}, got {}",
                expected,
                size,
                data.len()
            )));
        }
        Ok(Self {
            data,
            size,
            domain_min: [0.0; 3],
            domain_max: [255.0; 3],
        })
    }

    /// Sets the input domain (0..=255 scale, per axis).
    pub fn with_domain(mut self, min: [f32; 3], max: [f32; 3]) -> Self {
        self.domain_min = min;
        self.domain_max = max;
        self
    }

    /// Edge size of the cube.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Raw samples in R-fastest order, 0..=255 scale.
    pub fn data(&self) -> &[[f32; 3]] {
        &self.data
    }

    /// Input domain as `(min, max)` per axis, 0..=255 scale.
    pub fn domain(&self) -> ([f32; 3], [f32; 3]) {
        (self.domain_min, self.domain_max)
    }

    /// Sample at grid position (r, g, b). R varies fastest.
    #[inline]
    fn get(&self, r: usize, g: usize, b: usize) -> [f32; 3] {
        debug_assert!(r < self.size && g < self.size && b < self.size);
        self.data[r + self.size * (g + self.size * b)]
    }

    /// Maps a color through the cube with trilinear interpolation.
    pub fn lookup(&self, rgb: Rgb) -> Rgb {
        let src = rgb.to_f32();
        let last = (self.size - 1) as f32;

        // Continuous grid coordinates, clamped so the upper cell corner
        // never indexes past the edge (an input at domain_max would).
        let mut base = [0usize; 3];
        let mut frac = [0.0f32; 3];
        for axis in 0..3 {
            let width = self.domain_max[axis] - self.domain_min[axis];
            let g = ((src[axis] - self.domain_min[axis]) * last / width).clamp(0.0, last);
            let g0 = (g.floor() as usize).min(self.size - 2);
            base[axis] = g0;
            frac[axis] = g - g0 as f32;
        }

        let (ri, gi, bi) = (base[0], base[1], base[2]);
        let c000 = self.get(ri, gi, bi);
        let c100 = self.get(ri + 1, gi, bi);
        let c010 = self.get(ri, gi + 1, bi);
        let c110 = self.get(ri + 1, gi + 1, bi);
        let c001 = self.get(ri, gi, bi + 1);
        let c101 = self.get(ri + 1, gi, bi + 1);
        let c011 = self.get(ri, gi + 1, bi + 1);
        let c111 = self.get(ri + 1, gi + 1, bi + 1);

        let (rf, gf, bf) = (frac[0], frac[1], frac[2]);
        let mut out = [0.0f32; 3];
        for i in 0..3 {
            let c00 = c000[i] * (1.0 - rf) + c100[i] * rf;
            let c01 = c001[i] * (1.0 - rf) + c101[i] * rf;
            let c10 = c010[i] * (1.0 - rf) + c110[i] * rf;
            let c11 = c011[i] * (1.0 - rf) + c111[i] * rf;

            let c0 = c00 * (1.0 - gf) + c10 * gf;
            let c1 = c01 * (1.0 - gf) + c11 * gf;

            out[i] = c0 * (1.0 - bf) + c1 * bf;
        }

        Rgb::from_f32(out)
    }
}

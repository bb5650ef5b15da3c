//! Polymorphic lookup over the two table shapes.

use crate::color::Rgb;
use crate::{Lut1D, Lut3D};

/// A ready-to-use color lookup table.
///
/// The `.cube` parser picks the variant from the size directive it
/// reads; callers consume only [`Lut::lookup`] and never the concrete
/// table shape. A built `Lut` is immutable and safe to share across
/// threads for as many frames as it is needed.
#[derive(Debug, Clone)]
pub enum Lut {
    /// Independent per-channel curves (3x1D).
    OneD(Lut1D),
    /// Joint cross-channel cube transform.
    ThreeD(Lut3D),
}

impl Lut {
    /// Pass-through table, the documented fallback for callers that
    /// prefer unchanged output over a failed parse.
    pub fn identity() -> Self {
        Self::OneD(Lut1D::identity())
    }

    /// Maps a source color to its graded output.
    #[inline]
    pub fn lookup(&self, rgb: Rgb) -> Rgb {
        match self {
            Self::OneD(lut) => lut.lookup(rgb),
            Self::ThreeD(lut) => lut.lookup(rgb),
        }
    }
}

impl From<Lut1D> for Lut {
    fn from(lut: Lut1D) -> Self {
        Self::OneD(lut)
    }
}

impl From<Lut3D> for Lut {
    fn from(lut: Lut3D) -> Self {
        Self::ThreeD(lut)
    }
}

//! 8-bit RGB color value.

/// An immutable 3-channel 8-bit color.
///
/// Equality is channel-wise. Alpha is not part of the color; the frame
/// driver carries it through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as `f32` in the 0..=255 scale.
    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Builds a color from 0..=255-scale floats, rounding and clamping
    /// each channel. Out-of-range values saturate, they never wrap.
    #[inline]
    pub fn from_f32(rgb: [f32; 3]) -> Self {
        Self {
            r: quantize(rgb[0]),
            g: quantize(rgb[1]),
            b: quantize(rgb[2]),
        }
    }
}

/// Rounds and clamps a 0..=255-scale value to an 8-bit channel.
#[inline]
pub(crate) fn quantize(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_channel_wise() {
        assert_eq!(Rgb::new(1, 2, 3), Rgb::new(1, 2, 3));
        assert_ne!(Rgb::new(1, 2, 3), Rgb::new(1, 2, 4));
    }

    #[test]
    fn from_f32_saturates() {
        assert_eq!(Rgb::from_f32([-10.0, 300.0, 127.5]), Rgb::new(0, 255, 128));
    }

    #[test]
    fn from_f32_rounds_to_nearest() {
        assert_eq!(Rgb::from_f32([0.4, 0.6, 254.5]), Rgb::new(0, 1, 255));
    }

    #[test]
    fn roundtrip_through_f32() {
        for v in [0u8, 1, 127, 128, 254, 255] {
            let c = Rgb::new(v, v, v);
            assert_eq!(Rgb::from_f32(c.to_f32()), c);
        }
    }
}

//! In-place LUT application over packed RGBA8 frame buffers.
//!
//! Buffers are interleaved R,G,B,A bytes, row-major, 4 bytes per pixel.
//! Every pixel reads only itself and the shared immutable table and
//! writes only itself, so rows can be processed in any order; with the
//! `parallel` feature (default) they run on rayon workers.

use framefx_lut::{Lut, Rgb};
use tracing::debug;

use crate::{OpsError, OpsResult};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Bytes per packed pixel (R, G, B, A).
const PIXEL_STRIDE: usize = 4;

/// Applies a LUT to every pixel of an RGBA8 buffer at full strength.
///
/// Alpha bytes are left untouched. The buffer must hold exactly
/// `width * height * 4` bytes.
///
/// # Example
///
/// ```rust
/// use framefx_lut::Lut;
/// use framefx_ops::frame;
///
/// let mut pixels = vec![0u8; 16 * 9 * 4];
/// frame::apply(&mut pixels, 16, 9, &Lut::identity()).unwrap();
/// ```
pub fn apply(pixels: &mut [u8], width: usize, height: usize, lut: &Lut) -> OpsResult<()> {
    apply_with_intensity(pixels, width, height, lut, 1.0)
}

/// Applies a LUT blended with the original pixels by `intensity`.
///
/// `intensity` is clamped to [0, 1]: 0 leaves the buffer bit-identical,
/// 1 is the full transform, values between blend per channel with
/// `out = lerp(original, looked_up, intensity)`. The per-frame value
/// normally comes from an externally evaluated effect curve.
pub fn apply_with_intensity(
    pixels: &mut [u8],
    width: usize,
    height: usize,
    lut: &Lut,
    intensity: f32,
) -> OpsResult<()> {
    let expected = width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(PIXEL_STRIDE))
        .ok_or_else(|| OpsError::InvalidDimensions("frame dimensions overflow".into()))?;
    if pixels.len() != expected {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {} bytes for {}x{} RGBA, got {}",
            expected,
            width,
            height,
            pixels.len()
        )));
    }

    let intensity = if intensity.is_finite() {
        intensity.clamp(0.0, 1.0)
    } else {
        1.0
    };
    debug!(width, height, intensity, "applying LUT to frame");
    if intensity == 0.0 || pixels.is_empty() {
        return Ok(());
    }

    let row_bytes = width * PIXEL_STRIDE;

    #[cfg(feature = "parallel")]
    pixels
        .par_chunks_mut(row_bytes)
        .for_each(|row| transform_row(row, lut, intensity));

    #[cfg(not(feature = "parallel"))]
    for row in pixels.chunks_mut(row_bytes) {
        transform_row(row, lut, intensity);
    }

    Ok(())
}

/// Transforms one row of packed RGBA pixels.
fn transform_row(row: &mut [u8], lut: &Lut, intensity: f32) {
    for px in row.chunks_exact_mut(PIXEL_STRIDE) {
        let source = Rgb::new(px[0], px[1], px[2]);
        let graded = lut.lookup(source);
        let out = if intensity >= 1.0 {
            graded
        } else {
            blend(source, graded, intensity)
        };
        px[0] = out.r;
        px[1] = out.g;
        px[2] = out.b;
        // px[3] (alpha) stays as-is
    }
}

/// Per-channel lerp between the untouched and graded colors.
fn blend(original: Rgb, graded: Rgb, t: f32) -> Rgb {
    let a = original.to_f32();
    let b = graded.to_f32();
    Rgb::from_f32([
        (b[0] - a[0]).mul_add(t, a[0]),
        (b[1] - a[1]).mul_add(t, a[1]),
        (b[2] - a[2]).mul_add(t, a[2]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use framefx_lut::Lut1D;

    /// Curve that inverts every channel.
    fn inverting_lut() -> Lut {
        Lut::OneD(
            Lut1D::from_channels(
                vec![255.0, 0.0],
                vec![255.0, 0.0],
                vec![255.0, 0.0],
                [0.0; 3],
                [255.0; 3],
            )
            .unwrap(),
        )
    }

    /// Deterministic test frame with varied colors and alphas.
    fn test_frame(width: usize, height: usize) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 7 + y * 13) as u8);
                pixels.push((x * 31 ^ y * 3) as u8);
                pixels.push((x + y * 97) as u8);
                pixels.push((x * y + 5) as u8);
            }
        }
        pixels
    }

    #[test]
    fn identity_lut_leaves_frame_unchanged() {
        let mut pixels = test_frame(16, 9);
        let before = pixels.clone();
        apply(&mut pixels, 16, 9, &Lut::identity()).unwrap();
        assert_eq!(pixels, before);
    }

    #[test]
    fn inversion_transforms_color_but_not_alpha() {
        let mut pixels = vec![10, 20, 30, 200, 0, 255, 128, 7];
        apply(&mut pixels, 2, 1, &inverting_lut()).unwrap();
        assert_eq!(pixels, vec![245, 235, 225, 200, 255, 0, 127, 7]);
    }

    #[test]
    fn zero_intensity_is_a_bitwise_noop() {
        let mut pixels = test_frame(8, 8);
        let before = pixels.clone();
        apply_with_intensity(&mut pixels, 8, 8, &inverting_lut(), 0.0).unwrap();
        assert_eq!(pixels, before);
    }

    #[test]
    fn full_intensity_equals_plain_apply() {
        let mut a = test_frame(8, 8);
        let mut b = a.clone();
        apply(&mut a, 8, 8, &inverting_lut()).unwrap();
        apply_with_intensity(&mut b, 8, 8, &inverting_lut(), 1.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn half_intensity_blends_toward_the_grade() {
        // Source 0 grades to 255; halfway is 127.5, which rounds to 128.
        let mut pixels = vec![0, 0, 0, 9];
        apply_with_intensity(&mut pixels, 1, 1, &inverting_lut(), 0.5).unwrap();
        assert_eq!(pixels, vec![128, 128, 128, 9]);
    }

    #[test]
    fn intensity_clamps_out_of_range_values() {
        let mut high = vec![10, 20, 30, 0];
        let mut full = high.clone();
        apply_with_intensity(&mut high, 1, 1, &inverting_lut(), 4.0).unwrap();
        apply(&mut full, 1, 1, &inverting_lut()).unwrap();
        assert_eq!(high, full);

        let mut low = vec![10, 20, 30, 0];
        apply_with_intensity(&mut low, 1, 1, &inverting_lut(), -2.0).unwrap();
        assert_eq!(low, vec![10, 20, 30, 0]);
    }

    #[test]
    fn wrong_buffer_length_is_rejected() {
        let mut pixels = vec![0u8; 10];
        let err = apply(&mut pixels, 2, 2, &Lut::identity()).unwrap_err();
        assert!(matches!(err, OpsError::InvalidDimensions(_)));
    }

    #[test]
    fn empty_frame_is_accepted() {
        let mut pixels: Vec<u8> = Vec::new();
        apply(&mut pixels, 0, 0, &Lut::identity()).unwrap();
    }

    #[test]
    fn split_buffer_halves_match_whole_buffer_run() {
        // Per-pixel independence: two workers on half frames each must
        // produce the same bytes as one pass over the whole frame.
        let lut = inverting_lut();
        let (width, height) = (32, 16);
        let whole_src = test_frame(width, height);

        let mut whole = whole_src.clone();
        apply_with_intensity(&mut whole, width, height, &lut, 0.7).unwrap();

        let mut split = whole_src.clone();
        let half = width * (height / 2) * 4;
        let (top, bottom) = split.split_at_mut(half);
        std::thread::scope(|s| {
            s.spawn(|| apply_with_intensity(top, width, height / 2, &lut, 0.7).unwrap());
            s.spawn(|| apply_with_intensity(bottom, width, height / 2, &lut, 0.7).unwrap());
        });

        assert_eq!(split, whole);
    }
}

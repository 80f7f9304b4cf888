//! The color transform engine.
//!
//! Every output pixel depends only on the input pixel at the same position,
//! so the buffer can be mapped in any order. Large buffers are split into
//! bands of whole rows and mapped on the rayon pool; the result is identical
//! to the sequential path.
//!
//! ```text
//!   r' = M00·r + M01·g + M02·b
//!   g' = M10·r + M11·g + M12·b      then round, clamp to [0, 255]
//!   b' = M20·r + M21·g + M22·b
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::image::PixelBuffer;
use crate::matrix::ColorMatrix;
use crate::selection::{Deficiency, Mode};

/// Pixel count at which [`transform_with`] starts splitting rows across threads.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 65_536;

/// Tuning for [`transform_with`]. Does not affect output values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOptions {
    /// Minimum pixel count for the parallel path. `usize::MAX` disables it.
    pub parallel_threshold: usize,
}

impl TransformOptions {
    pub const fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
        }
    }
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Map every pixel of `buffer` through the (deficiency, mode) matrix.
///
/// Returns a new buffer of the same dimensions. An empty buffer yields an
/// empty buffer.
pub fn transform(buffer: &PixelBuffer, deficiency: Deficiency, mode: Mode) -> PixelBuffer {
    transform_with(buffer, deficiency, mode, &TransformOptions::default())
}

/// [`transform`] with explicit tuning.
pub fn transform_with(
    buffer: &PixelBuffer,
    deficiency: Deficiency,
    mode: Mode,
    options: &TransformOptions,
) -> PixelBuffer {
    let mut out = buffer.clone();
    apply_matrix(&mut out, ColorMatrix::for_selection(deficiency, mode), options);
    out
}

/// Map `buffer` in place, allocating nothing.
pub fn transform_in_place(buffer: &mut PixelBuffer, deficiency: Deficiency, mode: Mode) {
    transform_in_place_with(buffer, deficiency, mode, &TransformOptions::default());
}

/// [`transform_in_place`] with explicit tuning.
pub fn transform_in_place_with(
    buffer: &mut PixelBuffer,
    deficiency: Deficiency,
    mode: Mode,
    options: &TransformOptions,
) {
    apply_matrix(buffer, ColorMatrix::for_selection(deficiency, mode), options);
}

/// Map `buffer` in place through an arbitrary matrix.
pub fn apply_matrix(buffer: &mut PixelBuffer, matrix: &ColorMatrix, options: &TransformOptions) {
    if buffer.is_empty() {
        return;
    }

    let (width, height) = buffer.dimensions();
    let pixels = buffer.pixels_mut();

    if pixels.len() >= options.parallel_threshold {
        debug!(width, height, "transforming in parallel row bands");
        pixels
            .par_chunks_mut(width as usize)
            .for_each(|row| row.iter_mut().for_each(|px| *px = matrix.apply(*px)));
    } else {
        debug!(width, height, "transforming sequentially");
        pixels.iter_mut().for_each(|px| *px = matrix.apply(*px));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Pixel;

    fn single(px: Pixel) -> PixelBuffer {
        PixelBuffer::filled(1, 1, px)
    }

    fn map_one(px: Pixel, deficiency: Deficiency, mode: Mode) -> Pixel {
        transform(&single(px), deficiency, mode).pixels()[0]
    }

    /// Deterministic pseudo-random test image.
    fn noise(width: u32, height: u32) -> PixelBuffer {
        let mut state = 0x2545_f491_u32;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state & 0xff) as u8
        };
        let pixels = (0..width * height)
            .map(|_| Pixel::new(next(), next(), next()))
            .collect();
        PixelBuffer::new(width, height, pixels).unwrap()
    }

    fn selections() -> impl Iterator<Item = (Deficiency, Mode)> {
        Deficiency::all()
            .iter()
            .flat_map(|&d| Mode::all().iter().map(move |&m| (d, m)))
    }

    #[test]
    fn test_protanomaly_simulate_known_pixel() {
        let out = map_one(Pixel::new(200, 100, 50), Deficiency::Protanomaly, Mode::Simulate);
        assert_eq!(out, Pixel::new(157, 156, 62));
    }

    #[test]
    fn test_deuteranomaly_correct_known_pixel() {
        let out = map_one(Pixel::new(10, 20, 30), Deficiency::Deuteranomaly, Mode::Correct);
        assert_eq!(out, Pixel::new(12, 20, 33));
    }

    #[test]
    fn test_black_stays_black_for_every_selection() {
        for (d, m) in selections() {
            assert_eq!(map_one(Pixel::BLACK, d, m), Pixel::BLACK, "{d} {m}");
        }
    }

    #[test]
    fn test_white_simulate_matches_row_sums() {
        for &d in Deficiency::all() {
            let rows = ColorMatrix::for_selection(d, Mode::Simulate).rows();
            let expected: Vec<u8> = rows
                .iter()
                .map(|row| (255.0 * row.iter().sum::<f64>()).round().min(255.0) as u8)
                .collect();
            let out = map_one(Pixel::WHITE, d, Mode::Simulate);
            assert_eq!(out.to_array().to_vec(), expected, "{d}");
            assert_eq!(out, Pixel::WHITE, "{d}");
        }
    }

    #[test]
    fn test_correct_scales_each_channel_independently() {
        let scales = [
            (Deficiency::Protanomaly, [1.0, 1.2, 1.1]),
            (Deficiency::Deuteranomaly, [1.2, 1.0, 1.1]),
            (Deficiency::Tritanomaly, [1.2, 1.2, 1.0]),
            (Deficiency::SevereTritanomaly, [1.2, 1.2, 1.0]),
        ];
        let input = noise(16, 16);
        for (d, scale) in scales {
            let out = transform(&input, d, Mode::Correct);
            for (src, dst) in input.pixels().iter().zip(out.pixels()) {
                for c in 0..3 {
                    let expected = (src.to_array()[c] as f64 * scale[c]).round().clamp(0.0, 255.0);
                    assert_eq!(dst.to_array()[c], expected as u8, "{d} channel {c} of {src:?}");
                }
            }
        }
    }

    #[test]
    fn test_correct_clamps_full_intensity() {
        let out = map_one(Pixel::WHITE, Deficiency::Tritanomaly, Mode::Correct);
        assert_eq!(out, Pixel::WHITE);
        let out = map_one(Pixel::new(250, 213, 240), Deficiency::Protanomaly, Mode::Correct);
        assert_eq!(out, Pixel::new(250, 255, 255));
    }

    #[test]
    fn test_correct_after_simulate_is_not_an_inverse() {
        // Independent, non-inverse transforms: the source pixel is not recovered.
        let px = Pixel::new(200, 100, 50);
        for &d in Deficiency::all() {
            let simulated = map_one(px, d, Mode::Simulate);
            let corrected = map_one(simulated, d, Mode::Correct);
            assert_ne!(corrected, px, "{d}");
        }
    }

    #[test]
    fn test_simulate_is_not_idempotent() {
        let px = Pixel::new(200, 100, 50);
        let once = map_one(px, Deficiency::Protanomaly, Mode::Simulate);
        let twice = map_one(once, Deficiency::Protanomaly, Mode::Simulate);
        assert_ne!(once, twice);
    }

    #[test]
    fn test_dimensions_are_preserved() {
        for (w, h) in [(1, 1), (3, 7), (64, 2), (0, 5), (5, 0)] {
            let input = noise(w, h);
            for (d, m) in selections() {
                assert_eq!(transform(&input, d, m).dimensions(), (w, h));
            }
        }
    }

    #[test]
    fn test_zero_sized_buffer_is_noop() {
        let empty = PixelBuffer::new(0, 0, Vec::new()).unwrap();
        let out = transform(&empty, Deficiency::Deuteranomaly, Mode::Simulate);
        assert_eq!(out, empty);
    }

    #[test]
    fn test_transform_is_deterministic() {
        let input = noise(33, 17);
        for (d, m) in selections() {
            assert_eq!(transform(&input, d, m), transform(&input, d, m));
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let input = noise(97, 61);
        let parallel = TransformOptions {
            parallel_threshold: 1,
        };
        for (d, m) in selections() {
            let seq = transform_with(&input, d, m, &TransformOptions::sequential());
            let par = transform_with(&input, d, m, &parallel);
            assert_eq!(seq, par, "{d} {m}");
        }
    }

    #[test]
    fn test_in_place_matches_copying_transform() {
        let input = noise(8, 8);
        let mut buf = input.clone();
        transform_in_place(&mut buf, Deficiency::Tritanomaly, Mode::Simulate);
        assert_eq!(buf, transform(&input, Deficiency::Tritanomaly, Mode::Simulate));
    }

    #[test]
    fn test_input_buffer_is_untouched() {
        let input = noise(4, 4);
        let before = input.clone();
        let _ = transform(&input, Deficiency::SevereTritanomaly, Mode::Correct);
        assert_eq!(input, before);
    }

    #[test]
    fn test_pixels_map_independently() {
        let input = noise(5, 5);
        let out = transform(&input, Deficiency::Deuteranomaly, Mode::Simulate);
        for (src, dst) in input.pixels().iter().zip(out.pixels()) {
            assert_eq!(map_one(*src, Deficiency::Deuteranomaly, Mode::Simulate), *dst);
        }
    }
}

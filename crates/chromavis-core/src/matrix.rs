//! Fixed 3x3 transform matrices, one per (deficiency, mode) pair.
//!
//! Simulate matrices blend channels so each row sums to 1.0. Correct
//! matrices are plain per-channel gains; they have no derivation beyond the
//! literal coefficients and are reproduced exactly.

use glam::{DMat3, DVec3};

use crate::image::Pixel;
use crate::selection::{Deficiency, Mode};

/// A 3x3 color matrix applied to 8-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix(DMat3);

impl ColorMatrix {
    /// Build from rows, so `rows[0]` produces the output red channel.
    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self(DMat3::from_cols(
            DVec3::new(rows[0][0], rows[1][0], rows[2][0]),
            DVec3::new(rows[0][1], rows[1][1], rows[2][1]),
            DVec3::new(rows[0][2], rows[1][2], rows[2][2]),
        ))
    }

    pub const fn diagonal(r: f64, g: f64, b: f64) -> Self {
        Self::from_rows([[r, 0.0, 0.0], [0.0, g, 0.0], [0.0, 0.0, b]])
    }

    /// Returns the identity matrix (no-op transform).
    pub const fn identity() -> Self {
        Self::diagonal(1.0, 1.0, 1.0)
    }

    /// The matrix used for `deficiency` in `mode`.
    pub fn for_selection(deficiency: Deficiency, mode: Mode) -> &'static Self {
        match (mode, deficiency) {
            (Mode::Simulate, Deficiency::Protanomaly) => &PROTANOMALY_SIMULATE,
            (Mode::Simulate, Deficiency::Deuteranomaly) => &DEUTERANOMALY_SIMULATE,
            (Mode::Simulate, Deficiency::Tritanomaly) => &TRITANOMALY_SIMULATE,
            (Mode::Simulate, Deficiency::SevereTritanomaly) => &SEVERE_TRITANOMALY_SIMULATE,
            (Mode::Correct, Deficiency::Protanomaly) => &PROTANOMALY_CORRECT,
            (Mode::Correct, Deficiency::Deuteranomaly) => &DEUTERANOMALY_CORRECT,
            (Mode::Correct, Deficiency::Tritanomaly | Deficiency::SevereTritanomaly) => {
                &TRITANOMALY_CORRECT
            }
        }
    }

    pub fn rows(&self) -> [[f64; 3]; 3] {
        self.0.transpose().to_cols_array_2d()
    }

    /// Multiply without rounding. Useful for inspecting exact channel values.
    pub fn apply_f64(&self, rgb: [f64; 3]) -> [f64; 3] {
        (self.0 * DVec3::from_array(rgb)).to_array()
    }

    /// Apply to one pixel: multiply, round half away from zero, clamp to [0, 255].
    pub fn apply(&self, px: Pixel) -> Pixel {
        let rgb = DVec3::new(px.r as f64, px.g as f64, px.b as f64);
        let out = (self.0 * rgb)
            .round()
            .clamp(DVec3::ZERO, DVec3::splat(255.0));
        Pixel::new(out.x as u8, out.y as u8, out.z as u8)
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

pub const PROTANOMALY_SIMULATE: ColorMatrix = ColorMatrix::from_rows([
    [0.56667, 0.43333, 0.0],
    [0.55833, 0.44167, 0.0],
    [0.0, 0.24167, 0.75833],
]);

pub const DEUTERANOMALY_SIMULATE: ColorMatrix = ColorMatrix::from_rows([
    [0.625, 0.375, 0.0],
    [0.7, 0.3, 0.0],
    [0.0, 0.3, 0.7],
]);

pub const TRITANOMALY_SIMULATE: ColorMatrix = ColorMatrix::from_rows([
    [0.95, 0.05, 0.0],
    [0.0, 0.43333, 0.56667],
    [0.0, 0.475, 0.525],
]);

pub const SEVERE_TRITANOMALY_SIMULATE: ColorMatrix = ColorMatrix::from_rows([
    [0.95, 0.05, 0.0],
    [0.0, 0.25833, 0.74167],
    [0.0, 0.275, 0.725],
]);

pub const PROTANOMALY_CORRECT: ColorMatrix = ColorMatrix::diagonal(1.0, 1.2, 1.1);

pub const DEUTERANOMALY_CORRECT: ColorMatrix = ColorMatrix::diagonal(1.2, 1.0, 1.1);

/// Shared by tritanomaly and severe tritanomaly.
pub const TRITANOMALY_CORRECT: ColorMatrix = ColorMatrix::diagonal(1.2, 1.2, 1.0);

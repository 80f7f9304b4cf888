//! Chromavis Core — color transform engine for color-vision deficiencies.
//!
//! This crate contains the pixel buffer model, the fixed simulate/correct
//! matrices and the per-pixel transform. No codec or framework dependencies.

pub mod error;
pub mod image;
pub mod matrix;
pub mod selection;
pub mod transform;

// Re-exports for convenience.
pub use error::CoreError;
pub use image::{Pixel, PixelBuffer};
pub use matrix::ColorMatrix;
pub use selection::{Deficiency, Mode};
pub use transform::{
    TransformOptions, transform, transform_in_place, transform_in_place_with, transform_with,
};

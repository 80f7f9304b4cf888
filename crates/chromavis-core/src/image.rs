//! Pixel buffer representation for the transform engine.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One 8-bit RGB pixel. Alpha is not part of this model.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Pixel {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Pixel> for [u8; 3] {
    fn from(px: Pixel) -> Self {
        px.to_array()
    }
}

/// Row-major RGB image with fixed dimensions.
///
/// `pixels.len()` is always `width * height`; the constructors enforce it and
/// the buffer never changes shape afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// Wrap existing pixel data. Fails if the pixel count is not `width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, CoreError> {
        if pixels.len() != pixel_count(width, height) {
            return Err(CoreError::BufferSizeMismatch {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A buffer with every pixel set to `fill`.
    pub fn filled(width: u32, height: u32, fill: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; pixel_count(width, height)],
        }
    }

    /// Build from tightly packed `RGBRGB...` bytes.
    pub fn from_rgb_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.len() % 3 != 0 {
            return Err(CoreError::BufferSizeMismatch {
                width,
                height,
                len: bytes.len() / 3,
            });
        }
        Self::new(width, height, bytemuck::cast_slice(bytes).to_vec())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Pixel data as packed `RGBRGB...` bytes, without copying.
    pub fn as_rgb_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    /// Pixel at column `x`, row `y`, or `None` outside `[0, width) x [0, height)`.
    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut Pixel> {
        self.index(x, y).map(move |i| &mut self.pixels[i])
    }

    /// Iterate rows top to bottom. Yields nothing for an empty buffer.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        // chunks() panics on zero, and an empty buffer has no rows anyway.
        self.pixels.chunks(self.width.max(1) as usize)
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

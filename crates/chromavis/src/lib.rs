//! Chromavis — simulate or correct color-vision deficiencies in images.
//!
//! Ties the codec adapter and the transform engine together into a single
//! decode → transform → encode call. Every call is independent; there is no
//! shared processor instance to initialize or reset.

mod config;
mod error;
mod pipeline;

pub use config::ProcessConfig;
pub use error::ProcessError;
pub use pipeline::{process_data_url, process_image, process_image_async};

pub use chromavis_codec::{CodecError, OutputFormat};
pub use chromavis_core::{CoreError, Deficiency, Mode, Pixel, PixelBuffer};

//! Image codec adapter for Chromavis.
//!
//! Bridges encoded image bytes (anything the `image` crate decodes) and the
//! [`PixelBuffer`](chromavis_core::PixelBuffer) used by the transform engine.
//! Also handles `data:` URL framing for callers that move images around as
//! strings. No disk or network I/O happens here.

mod codec;
mod data_url;
mod error;
mod format;

pub use codec::{DecodedImage, decode, decode_with_alpha, encode, encode_with_alpha};
pub use data_url::{parse_data_url, to_data_url};
pub use error::CodecError;
pub use format::OutputFormat;

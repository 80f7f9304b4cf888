#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
    #[error("malformed data URL: {0}")]
    DataUrl(String),
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("alpha plane has {actual} samples, expected {expected}")]
    AlphaSizeMismatch { expected: usize, actual: usize },
    #[error(transparent)]
    Buffer(#[from] chromavis_core::CoreError),
    #[error("unsupported output format: {0:?}")]
    UnsupportedFormat(String),
}

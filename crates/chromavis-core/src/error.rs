#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("unsupported color-vision deficiency: {0:?}")]
    UnsupportedVariant(String),
    #[error("unsupported transform mode: {0:?}")]
    UnsupportedMode(String),
    #[error("pixel count {len} does not match {width}x{height}")]
    BufferSizeMismatch { width: u32, height: u32, len: usize },
}

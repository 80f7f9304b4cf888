use chromavis_codec::CodecError;
use chromavis_core::CoreError;

/// Errors that end a single processing call. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("input is {size} bytes, limit is {limit}")]
    InputTooLarge { size: usize, limit: usize },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("background task failed: {0}")]
    Join(String),
}

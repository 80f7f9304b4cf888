//! Processing configuration.

use std::path::Path;

use chromavis_codec::OutputFormat;
use chromavis_core::TransformOptions;
use chromavis_core::transform::DEFAULT_PARALLEL_THRESHOLD;
use serde::{Deserialize, Serialize};

use crate::error::ProcessError;

const ENV_OUTPUT_FORMAT: &str = "CHROMAVIS_OUTPUT_FORMAT";
const ENV_PRESERVE_ALPHA: &str = "CHROMAVIS_PRESERVE_ALPHA";
const ENV_PARALLEL_THRESHOLD: &str = "CHROMAVIS_PARALLEL_THRESHOLD";
const ENV_MAX_INPUT_BYTES: &str = "CHROMAVIS_MAX_INPUT_BYTES";

/// Settings for one or more processing calls. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessConfig {
    /// Container written for the result.
    pub output_format: OutputFormat,
    /// Carry the source alpha plane through to the output untouched.
    pub preserve_alpha: bool,
    /// Pixel count at which the transform is split across threads.
    pub parallel_threshold: usize,
    /// Reject inputs larger than this many bytes before decoding.
    pub max_input_bytes: Option<usize>,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Png,
            preserve_alpha: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            max_input_bytes: None,
        }
    }
}

impl ProcessConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ProcessError> {
        serde_json::from_str(json).map_err(|e| ProcessError::Config(e.to_string()))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ProcessError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ProcessError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Defaults with `CHROMAVIS_*` environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up by environment variable name.
    ///
    /// Values that fail to parse are skipped with a warning and the current
    /// setting is kept.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup(ENV_OUTPUT_FORMAT) {
            match v.parse() {
                Ok(format) => self.output_format = format,
                Err(e) => tracing::warn!("ignoring {ENV_OUTPUT_FORMAT}: {e}"),
            }
        }
        if let Some(v) = lookup(ENV_PRESERVE_ALPHA) {
            match parse_bool(&v) {
                Some(b) => self.preserve_alpha = b,
                None => tracing::warn!("ignoring {ENV_PRESERVE_ALPHA}: {v:?} is not a boolean"),
            }
        }
        if let Some(v) = lookup(ENV_PARALLEL_THRESHOLD) {
            match v.trim().parse() {
                Ok(n) => self.parallel_threshold = n,
                Err(e) => tracing::warn!("ignoring {ENV_PARALLEL_THRESHOLD}: {e}"),
            }
        }
        if let Some(v) = lookup(ENV_MAX_INPUT_BYTES) {
            match v.trim().parse() {
                Ok(n) => self.max_input_bytes = Some(n),
                Err(e) => tracing::warn!("ignoring {ENV_MAX_INPUT_BYTES}: {e}"),
            }
        }
        self
    }

    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            parallel_threshold: self.parallel_threshold,
        }
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

//! decode → transform → encode.

use chromavis_codec::{DecodedImage, decode, decode_with_alpha, encode_with_alpha};
use chromavis_core::{Deficiency, Mode, transform_in_place_with};
use tracing::debug;

use crate::config::ProcessConfig;
use crate::error::ProcessError;

/// Process one encoded image and return the encoded result.
///
/// The transform runs in place on the decoded buffer, so the only extra
/// allocation is the output container. Either a complete image or an error
/// comes back; there is no partial output.
pub fn process_image(
    input: &[u8],
    deficiency: Deficiency,
    mode: Mode,
    config: &ProcessConfig,
) -> Result<Vec<u8>, ProcessError> {
    if let Some(limit) = config.max_input_bytes {
        if input.len() > limit {
            return Err(ProcessError::InputTooLarge {
                size: input.len(),
                limit,
            });
        }
    }

    let mut image = if config.preserve_alpha {
        decode_with_alpha(input)?
    } else {
        DecodedImage::opaque(decode(input)?)
    };

    let (width, height) = image.pixels.dimensions();
    debug!(width, height, %deficiency, %mode, "applying color transform");
    transform_in_place_with(
        &mut image.pixels,
        deficiency,
        mode,
        &config.transform_options(),
    );

    Ok(encode_with_alpha(&image, config.output_format)?)
}

/// String-typed entry point for callers that pass images as `data:` URLs.
///
/// `deficiency` and `mode` are parsed before anything is decoded, so an
/// invalid selection fails fast with `UnsupportedVariant` / `UnsupportedMode`.
/// The result is a `data:` URL in the configured output format.
pub fn process_data_url(
    data_url: &str,
    deficiency: &str,
    mode: &str,
    config: &ProcessConfig,
) -> Result<String, ProcessError> {
    let deficiency: Deficiency = deficiency.parse()?;
    let mode: Mode = mode.parse()?;
    let input = chromavis_codec::parse_data_url(data_url)?;
    let output = process_image(&input, deficiency, mode, config)?;
    Ok(chromavis_codec::to_data_url(&output, config.output_format))
}

/// Run [`process_image`] on the blocking thread pool.
///
/// Dropping the returned future abandons the result; the work itself holds
/// no external state, so nothing needs cleaning up.
pub async fn process_image_async(
    input: Vec<u8>,
    deficiency: Deficiency,
    mode: Mode,
    config: ProcessConfig,
) -> Result<Vec<u8>, ProcessError> {
    tokio::task::spawn_blocking(move || process_image(&input, deficiency, mode, &config))
        .await
        .map_err(|e| ProcessError::Join(e.to_string()))?
}

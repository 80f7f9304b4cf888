//! `data:` URL framing for base64-encoded images.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::CodecError;
use crate::format::OutputFormat;

/// Extract the payload bytes from `data:<mime>;base64,<payload>`.
///
/// The media type is not checked; the decoder sniffs the real format from
/// the bytes. Only base64 payloads are accepted.
pub fn parse_data_url(url: &str) -> Result<Vec<u8>, CodecError> {
    let url = url.trim();
    let rest = url
        .get(..5)
        .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
        .map(|_| &url[5..])
        .ok_or_else(|| CodecError::DataUrl("missing `data:` scheme".into()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| CodecError::DataUrl("missing `,` before payload".into()))?;

    let is_base64 = header
        .rsplit(';')
        .next()
        .is_some_and(|param| param.eq_ignore_ascii_case("base64"));
    if !is_base64 {
        return Err(CodecError::DataUrl("payload is not base64".into()));
    }

    Ok(STANDARD.decode(payload)?)
}

/// Wrap encoded image bytes as `data:<mime>;base64,<payload>`.
pub fn to_data_url(bytes: &[u8], format: OutputFormat) -> String {
    format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(bytes))
}

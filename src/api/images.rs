//! Images travel as base64 strings inside JSON bodies and are served back raw.
use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::error::AppError;

/// Room for the non-image form fields and a data URL prefix.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Largest JSON body that can carry an image of `max_image_bytes` once base64 encoded.
pub(crate) fn body_limit(max_image_bytes: usize) -> usize {
    max_image_bytes
        .div_ceil(3)
        .saturating_mul(4)
        .saturating_add(FORM_OVERHEAD_BYTES)
}

/// Decodes an optional base64 field. Blank means "no image".
pub(crate) fn decode(
    field: &str,
    encoded: Option<&str>,
    max_bytes: usize,
) -> Result<Option<Vec<u8>>, AppError> {
    let Some(encoded) = encoded.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    // Accept data URLs as produced by browser file readers.
    let payload = encoded
        .split_once(";base64,")
        .map_or(encoded, |(_, data)| data);
    let bytes = STANDARD
        .decode(payload)
        .map_err(|error| AppError::BadRequest(format!("{field} is not valid base64: {error}")))?;
    if bytes.len() > max_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "{field} is {} bytes, the limit is {max_bytes}",
            bytes.len()
        )));
    }
    Ok(Some(bytes))
}

pub(crate) fn content_type(bytes: &[u8]) -> &'static str {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => "application/octet-stream",
    }
}

pub(crate) fn respond(bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type(&bytes))],
        bytes,
    )
        .into_response()
}

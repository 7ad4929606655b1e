//! Serializer: header and claims to canonical JSON, then base64url (no padding)
//!
//! Claims are held in a sorted map and the header is a fixed two-field struct,
//! so encoding identical content always yields identical bytes.

use crate::claims::Claims;
use crate::error::{JwtError, JwtResult};
use crate::header::Header;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Base64 URL-safe encoding without padding
#[inline]
pub fn base64_url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Base64 URL-safe decoding without padding.
///
/// # Errors
/// Returns `InvalidTokenFormat` for characters outside the url-safe alphabet,
/// padding, or non-canonical trailing bits.
#[inline]
pub fn base64_url_decode(input: &str) -> JwtResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| JwtError::invalid_format(format!("invalid base64url: {e}")))
}

fn encode_json<T: Serialize>(value: &T, what: &str) -> JwtResult<String> {
    let json = serde_json::to_vec(value)
        .map_err(|e| JwtError::Serialization(format!("{what}: {e}")))?;
    Ok(base64_url_encode(&json))
}

fn decode_json<T: DeserializeOwned>(segment: &str, what: &str) -> JwtResult<T> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| JwtError::invalid_format(format!("{what} encoding: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| JwtError::invalid_format(format!("{what} json: {e}")))
}

/// Encode a header segment.
///
/// # Errors
/// Returns `Serialization` if JSON encoding fails.
pub fn encode_header(header: &Header) -> JwtResult<String> {
    encode_json(header, "header")
}

/// Encode a payload segment.
///
/// # Errors
/// Returns `Serialization` if JSON encoding fails.
pub fn encode_payload(claims: &Claims) -> JwtResult<String> {
    encode_json(claims, "payload")
}

/// Decode a header segment.
///
/// # Errors
/// Returns `InvalidTokenFormat` on bad base64url or malformed JSON.
pub fn decode_header(segment: &str) -> JwtResult<Header> {
    decode_json(segment, "header")
}

/// Decode a payload segment; the JSON must be an object.
///
/// # Errors
/// Returns `InvalidTokenFormat` on bad base64url or malformed JSON.
pub fn decode_payload(segment: &str) -> JwtResult<Claims> {
    decode_json(segment, "payload")
}

/// Split a compact token into its three segments.
///
/// # Errors
/// Returns `InvalidTokenFormat` unless there are exactly three non-empty
/// dot-separated segments.
pub(crate) fn split_compact(token: &str) -> JwtResult<[&str; 3]> {
    let mut parts = token.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(payload), Some(signature), None)
            if !header.is_empty() && !payload.is_empty() && !signature.is_empty() =>
        {
            Ok([header, payload, signature])
        }
        _ => Err(JwtError::invalid_format(
            "expected three non-empty dot-separated segments",
        )),
    }
}

//! Verifier: recompute the MAC of a compact token and compare in constant time
//!
//! Verification never decodes the payload. Payload trust comes only from this
//! check succeeding; decoding is a separate step.

use crate::algorithms;
use crate::encoding::{base64_url_decode, decode_header, split_compact};
use crate::error::{JwtError, JwtResult};
use crate::signer::signing_input;
use subtle::ConstantTimeEq;

/// Verify the signature of a compact token.
///
/// # Errors
/// - `InvalidTokenFormat`: not three non-empty segments, undecodable header
///   or signature
/// - `UnsupportedTokenType`: header `typ` is not the token type tag
/// - `UnsupportedAlgorithm`: header `alg` is not registered
/// - `InvalidSignature`: MAC mismatch
pub fn verify(token: &str, secret: &[u8]) -> JwtResult<()> {
    let [header_b64, payload_b64, signature_b64] = split_compact(token)?;

    let header = decode_header(header_b64)?;
    if !header.has_token_type() {
        return Err(JwtError::UnsupportedTokenType(header.token_type));
    }
    let mac = algorithms::lookup(&header.algorithm)?;

    let expected = mac(signing_input(header_b64, payload_b64).as_bytes(), secret)?;
    let claimed = base64_url_decode(signature_b64)?;

    if bool::from(expected.as_slice().ct_eq(claimed.as_slice())) {
        Ok(())
    } else {
        Err(JwtError::InvalidSignature)
    }
}

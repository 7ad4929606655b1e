//! Signer: MAC over `encoded_header.encoded_payload`

use crate::algorithms;
use crate::claims::Claims;
use crate::encoding::{base64_url_encode, encode_header, encode_payload};
use crate::error::JwtResult;
use crate::header::Header;

/// Sign header and claims into a compact token `header.payload.signature`.
///
/// Pure computation; safe to call concurrently with the same or different
/// secrets.
///
/// # Errors
/// `UnsupportedAlgorithm` if `header.algorithm` is not registered,
/// `Serialization` if encoding fails, `InvalidKey` if the MAC rejects the key.
pub fn sign(header: &Header, claims: &Claims, secret: &[u8]) -> JwtResult<String> {
    let mac = algorithms::lookup(&header.algorithm)?;

    let mut token = signing_input(&encode_header(header)?, &encode_payload(claims)?);
    let signature = mac(token.as_bytes(), secret)?;

    token.push('.');
    token.push_str(&base64_url_encode(&signature));
    Ok(token)
}

/// Exact bytes the signature covers
#[inline]
pub(crate) fn signing_input(encoded_header: &str, encoded_payload: &str) -> String {
    let mut input = String::with_capacity(encoded_header.len() + encoded_payload.len() + 1);
    input.push_str(encoded_header);
    input.push('.');
    input.push_str(encoded_payload);
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JwtError;

    #[test]
    fn test_sign_produces_three_segments() {
        let mut claims = Claims::new();
        claims.set_subject("42");
        let token = sign(&Header::default(), &claims, b"secret").unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9");
        // 32-byte MAC, unpadded
        assert_eq!(parts[2].len(), 43);
    }

    #[test]
    fn test_sign_is_deterministic() {
        let mut claims = Claims::new();
        claims.set_subject("42").set("role", "admin");
        let a = sign(&Header::default(), &claims, b"secret").unwrap();
        let b = sign(&Header::default(), &claims, b"secret").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sign_rejects_unregistered_algorithm() {
        let header = Header {
            algorithm: "none".to_string(),
            token_type: "JWT".to_string(),
        };
        assert_eq!(
            sign(&header, &Claims::new(), b"secret"),
            Err(JwtError::UnsupportedAlgorithm("none".to_string()))
        );
    }
}

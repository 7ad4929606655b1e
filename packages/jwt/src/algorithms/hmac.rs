//! HMAC-based MAC functions

use crate::error::{JwtError, JwtResult};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute HMAC-SHA256 (HS256) over `message` keyed with `key`
#[inline]
pub(crate) fn hs256(message: &[u8], key: &[u8]) -> JwtResult<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|_| JwtError::InvalidKey("Invalid HMAC key".to_string()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // RFC 4231, test case 2
    #[test]
    fn test_hs256_known_answer() {
        let mac = hs256(b"what do ya want for nothing?", b"Jefe").unwrap();
        assert_eq!(
            mac,
            hex!("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
        );
    }

    #[test]
    fn test_hs256_accepts_empty_key() {
        let mac = hs256(b"payload", b"").unwrap();
        assert_eq!(mac.len(), 32);
    }
}

//! Algorithm registry
//!
//! Maps the header `alg` identifier to a MAC function. The registry is closed:
//! only symmetric-key MAC algorithms are supported and HS256 is the single
//! entry. Signing and verification resolve the identifier through the same
//! lookup, and the identifier travels inside the signed header.

mod hmac;

use crate::error::{JwtError, JwtResult};
use std::fmt;
use std::str::FromStr;

/// MAC function signature: `(message, key) -> mac`
pub type MacFn = fn(&[u8], &[u8]) -> JwtResult<Vec<u8>>;

/// Supported token algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// HMAC using SHA-256
    #[default]
    Hs256,
}

impl Algorithm {
    /// All registered algorithms
    pub const ALL: [Algorithm; 1] = [Algorithm::Hs256];

    /// Header `alg` identifier
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Algorithm::Hs256 => "HS256",
        }
    }

    /// Resolve a header identifier.
    ///
    /// # Errors
    /// Returns `UnsupportedAlgorithm` when the identifier is not registered.
    pub fn from_id(id: &str) -> JwtResult<Self> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.id() == id)
            .ok_or_else(|| JwtError::UnsupportedAlgorithm(id.to_string()))
    }

    /// MAC function backing this algorithm
    #[must_use]
    pub fn mac_fn(self) -> MacFn {
        match self {
            Algorithm::Hs256 => hmac::hs256,
        }
    }

    /// Recommended minimum secret length in bytes
    #[must_use]
    pub const fn recommended_key_size(self) -> usize {
        match self {
            Algorithm::Hs256 => 32, // 256 bits
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Algorithm {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s)
    }
}

impl serde::Serialize for Algorithm {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> serde::Deserialize<'de> for Algorithm {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        Self::from_id(&id).map_err(serde::de::Error::custom)
    }
}

/// Look up the MAC function registered for `id`.
///
/// # Errors
/// Returns `UnsupportedAlgorithm` when `id` is not registered.
pub fn lookup(id: &str) -> JwtResult<MacFn> {
    Algorithm::from_id(id).map(Algorithm::mac_fn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_hs256() {
        let mac = lookup("HS256").unwrap();
        assert_eq!(mac(b"msg", b"key").unwrap().len(), 32);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(
            lookup("hs256").unwrap_err(),
            JwtError::UnsupportedAlgorithm("hs256".to_string())
        );
    }

    #[test]
    fn test_unregistered_identifiers_rejected() {
        for id in ["none", "HS384", "RS256", "ES256", ""] {
            assert!(matches!(
                Algorithm::from_id(id),
                Err(JwtError::UnsupportedAlgorithm(_))
            ));
        }
    }

    #[test]
    fn test_identifier_round_trip() {
        for alg in Algorithm::ALL {
            assert_eq!(alg.id().parse::<Algorithm>().unwrap(), alg);
            assert_eq!(alg.to_string(), alg.id());
        }
    }
}

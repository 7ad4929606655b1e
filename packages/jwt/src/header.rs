//! Token header

use crate::algorithms::Algorithm;
use serde::{Deserialize, Deserializer, Serialize};

/// Token type tag carried in `typ`
pub const TOKEN_TYPE: &str = "JWT";

/// Token header.
///
/// `algorithm` is kept as the raw identifier so that a received header with an
/// unregistered algorithm still decodes and is rejected by the registry lookup.
/// An absent or null `alg`/`typ` decodes as the empty string and is rejected
/// the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Algorithm identifier (`alg`)
    #[serde(rename = "alg", default, deserialize_with = "null_as_empty")]
    pub algorithm: String,
    /// Token type tag (`typ`)
    #[serde(rename = "typ", default, deserialize_with = "null_as_empty")]
    pub token_type: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Header {
    /// Create a header for `algorithm` with the standard type tag
    #[must_use]
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm: algorithm.id().to_string(),
            token_type: TOKEN_TYPE.to_string(),
        }
    }

    /// Whether `typ` equals the token type tag
    #[must_use]
    pub fn has_token_type(&self) -> bool {
        self.token_type == TOKEN_TYPE
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new(Algorithm::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_json_shape() {
        let json = serde_json::to_string(&Header::default()).unwrap();
        assert_eq!(json, r#"{"alg":"HS256","typ":"JWT"}"#);
    }

    #[test]
    fn test_unknown_fields_ignored_on_decode() {
        let header: Header =
            serde_json::from_str(r#"{"alg":"HS256","typ":"JWT","kid":"k1"}"#).unwrap();
        assert_eq!(header, Header::default());
        assert!(header.has_token_type());
    }

    #[test]
    fn test_missing_or_null_fields_decode_empty() {
        let header: Header = serde_json::from_str(r#"{"alg":"HS256"}"#).unwrap();
        assert_eq!(header.token_type, "");
        assert!(!header.has_token_type());

        let header: Header = serde_json::from_str(r#"{"alg":null,"typ":null}"#).unwrap();
        assert_eq!(header.algorithm, "");
        assert_eq!(header.token_type, "");

        assert!(serde_json::from_str::<Header>(r#"{"alg":1,"typ":"JWT"}"#).is_err());
    }
}

//! Token error types
//!
//! Every check in the token pipeline reports exactly which step failed so the
//! HTTP layer can decide how to answer. Nothing here is fatal to the process.

use thiserror::Error;

/// Token operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// Token error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// The requested claim is not present in the container
    #[error("claim not found: {0}")]
    ClaimNotFound(String),

    /// The claim exists but holds a different representation than requested
    #[error("invalid claim type for {claim}: expected {expected}")]
    InvalidClaimType {
        /// Claim name
        claim: String,
        /// Representation the caller asked for
        expected: &'static str,
    },

    /// Wrong segment count, bad base64url or malformed JSON
    #[error("invalid token format: {0}")]
    InvalidTokenFormat(String),

    /// Header `typ` is not the token type tag
    #[error("unsupported token type: {0}")]
    UnsupportedTokenType(String),

    /// Header `alg` is not in the algorithm registry
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Recomputed MAC does not match the token signature
    #[error("invalid token signature")]
    InvalidSignature,

    /// `exp` is at or before the current time
    #[error("token expired")]
    TokenExpired,

    /// `nbf` is after the current time
    #[error("token should not be accepted for processing yet")]
    TokenNotYetValid,

    /// MAC key could not be used
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Header or claims could not be encoded as JSON
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration or secret loading failed
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl JwtError {
    /// Create an invalid token format error
    #[inline]
    #[must_use]
    pub fn invalid_format(reason: impl Into<String>) -> Self {
        Self::InvalidTokenFormat(reason.into())
    }

    /// Create a claim not found error
    #[inline]
    #[must_use]
    pub fn claim_not_found(claim: impl Into<String>) -> Self {
        Self::ClaimNotFound(claim.into())
    }

    /// Create an invalid claim type error
    #[inline]
    #[must_use]
    pub fn invalid_claim_type(claim: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidClaimType {
            claim: claim.into(),
            expected,
        }
    }

    /// Create a configuration error
    #[inline]
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration(reason.into())
    }

    /// Whether the error was caused by the token the client presented.
    ///
    /// Key, serialization and configuration errors are server faults; every
    /// other kind is a rejection of the presented credentials.
    #[must_use]
    pub fn is_authentication_failure(&self) -> bool {
        !matches!(
            self,
            Self::InvalidKey(_) | Self::Serialization(_) | Self::Configuration(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_failed_check() {
        assert_eq!(
            JwtError::claim_not_found("sub").to_string(),
            "claim not found: sub"
        );
        assert_eq!(
            JwtError::invalid_claim_type("exp", "integer").to_string(),
            "invalid claim type for exp: expected integer"
        );
        assert_eq!(JwtError::InvalidSignature.to_string(), "invalid token signature");
    }

    #[test]
    fn test_authentication_failure_classification() {
        assert!(JwtError::TokenExpired.is_authentication_failure());
        assert!(JwtError::invalid_format("x").is_authentication_failure());
        assert!(JwtError::UnsupportedAlgorithm("none".into()).is_authentication_failure());
        assert!(!JwtError::configuration("missing").is_authentication_failure());
        assert!(!JwtError::Serialization("x".into()).is_authentication_failure());
    }
}

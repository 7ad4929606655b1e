//! Token lifecycle
//!
//! Producer side: [`Token`] is created empty, populated through its claims and
//! consumed by [`Token::sign`].
//!
//! Consumer side: [`parse`] yields a [`ParsedToken`] whose claims are
//! untrusted. Only [`ParsedToken::verify`] (or [`decode_trusted`]) produces a
//! [`VerifiedToken`], and only [`VerifiedToken::validate`] produces a
//! [`ValidatedToken`]. No method leads back to the parsed state.

use crate::algorithms::Algorithm;
use crate::claims::Claims;
use crate::encoding::{decode_header, decode_payload, split_compact};
use crate::error::JwtResult;
use crate::header::Header;
use crate::validation::TemporalValidator;
use crate::{signer, verifier};
use std::marker::PhantomData;

/// Typestate markers for received tokens.
pub mod state {
    /// Decoded from a compact string; signature not checked.
    #[derive(Debug)]
    pub struct Parsed;
    /// Signature checked.
    #[derive(Debug)]
    pub struct Verified;
    /// Signature and `exp`/`nbf` checked.
    #[derive(Debug)]
    pub struct Validated;

    mod sealed {
        pub trait Sealed {}
        impl Sealed for super::Verified {}
        impl Sealed for super::Validated {}
    }

    /// States whose claims may be used as identity data.
    pub trait Trusted: sealed::Sealed {}
    impl Trusted for Verified {}
    impl Trusted for Validated {}
}

/// A token under construction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Token {
    header: Header,
    claims: Claims,
}

impl Token {
    /// Fresh HS256 token with no claims
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh token for a specific algorithm
    #[must_use]
    pub fn with_algorithm(algorithm: Algorithm) -> Self {
        Self {
            header: Header::new(algorithm),
            claims: Claims::new(),
        }
    }

    /// Token carrying existing claims
    #[must_use]
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            header: Header::default(),
            claims,
        }
    }

    /// Header
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Claims
    #[must_use]
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Mutable claims
    pub fn claims_mut(&mut self) -> &mut Claims {
        &mut self.claims
    }

    /// Sign into the compact form, consuming the token.
    ///
    /// # Errors
    /// See [`signer::sign`].
    pub fn sign(self, secret: &[u8]) -> JwtResult<String> {
        signer::sign(&self.header, &self.claims, secret)
    }
}

/// A token decoded from its compact form, in state `S`
#[derive(Debug)]
pub struct Received<S> {
    header: Header,
    claims: Claims,
    raw: String,
    _state: PhantomData<S>,
}

/// Decoded, signature not checked
pub type ParsedToken = Received<state::Parsed>;
/// Signature checked
pub type VerifiedToken = Received<state::Verified>;
/// Signature and time claims checked
pub type ValidatedToken = Received<state::Validated>;

impl<S> Received<S> {
    /// Header as received
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Compact form as received
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    fn transition<T>(self) -> Received<T> {
        Received {
            header: self.header,
            claims: self.claims,
            raw: self.raw,
            _state: PhantomData,
        }
    }
}

impl ParsedToken {
    /// Claims as decoded. Not authenticated: never use as identity data.
    #[must_use]
    pub fn untrusted_claims(&self) -> &Claims {
        &self.claims
    }

    /// Check the signature of the exact string this token was parsed from.
    ///
    /// # Errors
    /// See [`verifier::verify`]; failure is terminal for this token.
    pub fn verify(self, secret: &[u8]) -> JwtResult<VerifiedToken> {
        verifier::verify(&self.raw, secret)?;
        Ok(self.transition())
    }
}

impl VerifiedToken {
    /// Check `exp`/`nbf`.
    ///
    /// # Errors
    /// See [`TemporalValidator::validate`]; failure is terminal for this token.
    pub fn validate(self, validator: &TemporalValidator) -> JwtResult<ValidatedToken> {
        validator.validate(&self.claims)?;
        Ok(self.transition())
    }
}

impl<S: state::Trusted> Received<S> {
    /// Authenticated claims
    #[must_use]
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Take the authenticated claims
    #[must_use]
    pub fn into_claims(self) -> Claims {
        self.claims
    }
}

/// Decode a compact token without checking its signature.
///
/// The result is explicitly untrusted; call [`ParsedToken::verify`] before
/// reading claims as identity, or use [`decode_trusted`] instead.
///
/// # Errors
/// `InvalidTokenFormat` on segment count, base64url or JSON errors.
pub fn parse(token: &str) -> JwtResult<ParsedToken> {
    let [header_b64, payload_b64, _] = split_compact(token)?;
    Ok(Received {
        header: decode_header(header_b64)?,
        claims: decode_payload(payload_b64)?,
        raw: token.to_string(),
        _state: PhantomData,
    })
}

/// Verify then decode a compact token in one step.
///
/// # Errors
/// Any verifier error, then any decode error.
pub fn decode_trusted(token: &str, secret: &[u8]) -> JwtResult<VerifiedToken> {
    verifier::verify(token, secret)?;
    Ok(parse(token)?.transition())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JwtError;
    use chrono::{Duration, Utc};

    fn token_for(sub: &str) -> String {
        let mut token = Token::new();
        token.claims_mut().set_subject(sub);
        token.sign(b"secret").unwrap()
    }

    #[test]
    fn test_parse_exposes_untrusted_claims() {
        let parsed = parse(&token_for("42")).unwrap();
        assert_eq!(parsed.untrusted_claims().subject().unwrap(), "42");
        assert_eq!(parsed.header(), &Header::default());
    }

    #[test]
    fn test_parsed_to_verified_to_validated() {
        let compact = token_for("42");
        let validated = parse(&compact)
            .unwrap()
            .verify(b"secret")
            .unwrap()
            .validate(&TemporalValidator::new())
            .unwrap();
        assert_eq!(validated.claims().subject().unwrap(), "42");
        assert_eq!(validated.as_str(), compact);
    }

    #[test]
    fn test_verify_failure_is_reported() {
        let parsed = parse(&token_for("42")).unwrap();
        assert_eq!(parsed.verify(b"wrong").unwrap_err(), JwtError::InvalidSignature);
    }

    #[test]
    fn test_decode_trusted() {
        let verified = decode_trusted(&token_for("7"), b"secret").unwrap();
        assert_eq!(verified.into_claims().subject().unwrap(), "7");
        assert_eq!(
            decode_trusted(&token_for("7"), b"other").unwrap_err(),
            JwtError::InvalidSignature
        );
    }

    #[test]
    fn test_validate_expired() {
        let mut token = Token::new();
        token
            .claims_mut()
            .set_subject("1")
            .set_expiration_time(Utc::now() - Duration::seconds(10));
        let compact = token.sign(b"secret").unwrap();

        let verified = decode_trusted(&compact, b"secret").unwrap();
        assert_eq!(
            verified.validate(&TemporalValidator::new()).unwrap_err(),
            JwtError::TokenExpired
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            parse("a.b"),
            Err(JwtError::InvalidTokenFormat(_))
        ));
    }
}

//! Claims container
//!
//! Maps claim names to [`ClaimValue`]s. Registered claims get typed accessors;
//! custom claims go through [`Claims::set`] / [`Claims::get`]. Keys are kept
//! sorted so the serialized payload is byte-reproducible for identical content.

pub mod registered;
mod value;

pub use value::ClaimValue;

use crate::error::{JwtError, JwtResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Token claims
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims {
    entries: BTreeMap<String, ClaimValue>,
}

impl Claims {
    /// Create an empty claims container
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a claim, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ClaimValue>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Get a claim value.
    ///
    /// # Errors
    /// Returns `ClaimNotFound` when the claim is absent.
    pub fn get(&self, key: &str) -> JwtResult<&ClaimValue> {
        self.entries
            .get(key)
            .ok_or_else(|| JwtError::claim_not_found(key))
    }

    /// Remove a claim, returning its previous value
    pub fn remove(&mut self, key: &str) -> Option<ClaimValue> {
        self.entries.remove(key)
    }

    /// Whether the claim is present
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of claims
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no claims are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate claims in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClaimValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Read a string claim.
    ///
    /// # Errors
    /// `ClaimNotFound` if absent, `InvalidClaimType` if not a string.
    pub fn get_str(&self, key: &str) -> JwtResult<&str> {
        self.get(key)?
            .as_str()
            .ok_or_else(|| JwtError::invalid_claim_type(key, "string"))
    }

    /// Read an integer claim.
    ///
    /// # Errors
    /// `ClaimNotFound` if absent, `InvalidClaimType` if not an integer.
    pub fn get_i64(&self, key: &str) -> JwtResult<i64> {
        self.get(key)?
            .as_i64()
            .ok_or_else(|| JwtError::invalid_claim_type(key, "integer"))
    }

    /// Read a time claim stored as unix seconds.
    ///
    /// # Errors
    /// `ClaimNotFound` if absent, `InvalidClaimType` if not an integer or out
    /// of the representable time range.
    pub fn get_time(&self, key: &str) -> JwtResult<DateTime<Utc>> {
        let secs = self.get_i64(key)?;
        DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| JwtError::invalid_claim_type(key, "unix timestamp"))
    }

    /// Store a time claim as unix seconds; sub-second precision is dropped
    pub fn set_time(&mut self, key: impl Into<String>, time: impl Into<DateTime<Utc>>) -> &mut Self {
        self.set(key, time.into().timestamp())
    }

    /// Set the issuer (iss) claim
    pub fn set_issuer(&mut self, iss: impl Into<String>) -> &mut Self {
        self.set(registered::ISSUER, iss.into())
    }

    /// Issuer (iss) claim.
    ///
    /// # Errors
    /// `ClaimNotFound` or `InvalidClaimType`.
    pub fn issuer(&self) -> JwtResult<&str> {
        self.get_str(registered::ISSUER)
    }

    /// Set the subject (sub) claim
    pub fn set_subject(&mut self, sub: impl Into<String>) -> &mut Self {
        self.set(registered::SUBJECT, sub.into())
    }

    /// Subject (sub) claim.
    ///
    /// # Errors
    /// `ClaimNotFound` or `InvalidClaimType`.
    pub fn subject(&self) -> JwtResult<&str> {
        self.get_str(registered::SUBJECT)
    }

    /// Set the audience (aud) claim from one or many values
    pub fn set_audience<I, S>(&mut self, aud: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let aud: Vec<String> = aud.into_iter().map(Into::into).collect();
        self.set(registered::AUDIENCE, aud)
    }

    /// Audience (aud) claim; a single string is returned as a one-element list.
    ///
    /// # Errors
    /// `ClaimNotFound` or `InvalidClaimType`.
    pub fn audience(&self) -> JwtResult<Vec<String>> {
        let value = self.get(registered::AUDIENCE)?;
        if let Some(items) = value.as_string_list() {
            return Ok(items);
        }
        value
            .as_str()
            .map(|aud| vec![aud.to_string()])
            .ok_or_else(|| JwtError::invalid_claim_type(registered::AUDIENCE, "string or string array"))
    }

    /// Set the expiration time (exp) claim
    pub fn set_expiration_time(&mut self, exp: impl Into<DateTime<Utc>>) -> &mut Self {
        self.set_time(registered::EXPIRATION_TIME, exp)
    }

    /// Expiration time (exp) claim.
    ///
    /// # Errors
    /// `ClaimNotFound` or `InvalidClaimType`.
    pub fn expiration_time(&self) -> JwtResult<DateTime<Utc>> {
        self.get_time(registered::EXPIRATION_TIME)
    }

    /// Set the not-before (nbf) claim
    pub fn set_not_before(&mut self, nbf: impl Into<DateTime<Utc>>) -> &mut Self {
        self.set_time(registered::NOT_BEFORE, nbf)
    }

    /// Not-before (nbf) claim.
    ///
    /// # Errors
    /// `ClaimNotFound` or `InvalidClaimType`.
    pub fn not_before(&self) -> JwtResult<DateTime<Utc>> {
        self.get_time(registered::NOT_BEFORE)
    }

    /// Set the issued-at (iat) claim
    pub fn set_issued_at(&mut self, iat: impl Into<DateTime<Utc>>) -> &mut Self {
        self.set_time(registered::ISSUED_AT, iat)
    }

    /// Issued-at (iat) claim.
    ///
    /// # Errors
    /// `ClaimNotFound` or `InvalidClaimType`.
    pub fn issued_at(&self) -> JwtResult<DateTime<Utc>> {
        self.get_time(registered::ISSUED_AT)
    }

    /// Set the token ID (jti) claim
    pub fn set_token_id(&mut self, jti: impl Into<String>) -> &mut Self {
        self.set(registered::TOKEN_ID, jti.into())
    }

    /// Token ID (jti) claim.
    ///
    /// # Errors
    /// `ClaimNotFound` or `InvalidClaimType`.
    pub fn token_id(&self) -> JwtResult<&str> {
        self.get_str(registered::TOKEN_ID)
    }
}

impl<K: Into<String>, V: Into<ClaimValue>> FromIterator<(K, V)> for Claims {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    #[test]
    fn test_missing_claim() {
        let claims = Claims::new();
        assert_eq!(claims.subject(), Err(JwtError::claim_not_found("sub")));
        assert_eq!(claims.get("role"), Err(JwtError::claim_not_found("role")));
    }

    #[test]
    fn test_registered_string_claims() {
        let mut claims = Claims::new();
        claims
            .set_subject("42")
            .set_issuer("conduit")
            .set_token_id("abc");

        assert_eq!(claims.subject().unwrap(), "42");
        assert_eq!(claims.issuer().unwrap(), "conduit");
        assert_eq!(claims.token_id().unwrap(), "abc");
    }

    #[test]
    fn test_typed_getter_rejects_wrong_type() {
        let mut claims = Claims::new();
        claims.set("sub", 42i64).set("exp", "tomorrow");

        assert_eq!(
            claims.subject(),
            Err(JwtError::invalid_claim_type("sub", "string"))
        );
        assert_eq!(
            claims.expiration_time(),
            Err(JwtError::invalid_claim_type("exp", "integer"))
        );
    }

    #[test]
    fn test_time_claims_stored_as_epoch_seconds() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
            + Duration::milliseconds(750);
        let mut claims = Claims::new();
        claims.set_expiration_time(at);

        assert_eq!(claims.get("exp").unwrap(), &ClaimValue::Integer(at.timestamp()));
        assert_eq!(claims.expiration_time().unwrap().timestamp(), at.timestamp());
        assert_eq!(claims.expiration_time().unwrap().timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_audience_single_and_many() {
        let mut claims = Claims::new();
        claims.set_audience(["api"]);
        assert_eq!(claims.audience().unwrap(), vec!["api".to_string()]);

        claims.set_audience(vec!["api", "web"]);
        assert_eq!(claims.audience().unwrap(), vec!["api", "web"]);

        claims.set("aud", "mobile");
        assert_eq!(claims.audience().unwrap(), vec!["mobile"]);

        claims.set("aud", ClaimValue::Json(json!(["ios", "android"])));
        assert_eq!(claims.audience().unwrap(), vec!["ios", "android"]);

        claims.set("aud", 5i64);
        assert!(matches!(
            claims.audience(),
            Err(JwtError::InvalidClaimType { .. })
        ));
    }

    #[test]
    fn test_custom_claims() {
        let mut claims = Claims::new();
        claims
            .set("admin", true)
            .set("scopes", json!(["read", "write"]));

        assert_eq!(claims.get("admin").unwrap().as_bool(), Some(true));
        assert_eq!(
            claims.get("scopes").unwrap().as_string_list(),
            Some(vec!["read".to_string(), "write".to_string()])
        );
        assert_eq!(claims.len(), 2);
        assert!(claims.remove("admin").is_some());
        assert!(!claims.contains("admin"));
    }

    #[test]
    fn test_serialization_is_sorted_and_reproducible() {
        let mut a = Claims::new();
        a.set("z", 1i64).set_subject("7").set("a", "x");
        let mut b = Claims::new();
        b.set("a", "x").set("z", 1i64).set_subject("7");

        let a_json = serde_json::to_string(&a).unwrap();
        assert_eq!(a_json, serde_json::to_string(&b).unwrap());
        assert_eq!(a_json, r#"{"a":"x","sub":"7","z":1}"#);
    }
}

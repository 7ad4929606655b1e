//! Token issuance for login and registration

use crate::algorithms::Algorithm;
use crate::claims::Claims;
use crate::config::TokenConfig;
use crate::error::{JwtError, JwtResult};
use crate::key::SecretKey;
use crate::token::Token;
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Issues signed tokens identifying a user
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    secret: Arc<SecretKey>,
    algorithm: Algorithm,
    lifetime: Option<Duration>,
    issuer: Option<String>,
}

impl TokenIssuer {
    /// Issuer with no expiry and no `iss`
    #[must_use]
    pub fn new(secret: Arc<SecretKey>) -> Self {
        Self {
            secret,
            algorithm: Algorithm::default(),
            lifetime: None,
            issuer: None,
        }
    }

    /// Issuer configured from `config`
    ///
    /// # Errors
    /// Returns `Configuration` when the configured lifetime is unusable.
    pub fn from_config(config: &TokenConfig, secret: Arc<SecretKey>) -> JwtResult<Self> {
        Ok(Self {
            secret,
            algorithm: config.algorithm,
            lifetime: config.token_lifetime()?,
            issuer: config.issuer.clone(),
        })
    }

    /// Set the lifetime of issued tokens
    #[must_use]
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = Some(lifetime);
        self
    }

    /// Set the `iss` of issued tokens
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Issue a token for `subject`.
    ///
    /// # Errors
    /// See [`crate::signer::sign`].
    pub fn issue(&self, subject: impl Into<String>) -> JwtResult<String> {
        self.issue_with(subject, |_| {})
    }

    /// Issue a token for `subject`, letting `extra` add custom claims.
    ///
    /// Registered claims set by the issuer are applied after `extra` and win.
    ///
    /// # Errors
    /// `Configuration` when the lifetime is not positive or `now + lifetime`
    /// is out of range; otherwise see [`crate::signer::sign`].
    pub fn issue_with<F>(&self, subject: impl Into<String>, extra: F) -> JwtResult<String>
    where
        F: FnOnce(&mut Claims),
    {
        let now = Utc::now();
        let mut token = Token::with_algorithm(self.algorithm);
        let claims = token.claims_mut();
        extra(claims);

        claims
            .set_subject(subject)
            .set_issued_at(now)
            .set_token_id(Uuid::new_v4().to_string());
        if let Some(issuer) = &self.issuer {
            claims.set_issuer(issuer.clone());
        }
        if let Some(lifetime) = self.lifetime {
            if lifetime <= Duration::zero() {
                return Err(JwtError::configuration("token lifetime must be positive"));
            }
            let exp = now
                .checked_add_signed(lifetime)
                .ok_or_else(|| JwtError::configuration("token lifetime out of range"))?;
            claims.set_expiration_time(exp);
        }

        token.sign(self.secret.expose())
    }
}

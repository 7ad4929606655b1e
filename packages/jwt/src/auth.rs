//! Request authentication gate
//!
//! Sits between an HTTP framework and the token core: takes the raw
//! `Authorization` header, runs verify-then-decode and temporal validation,
//! and turns the subject into a user id. Every core failure becomes a 401.

use crate::claims::Claims;
use crate::error::JwtError;
use crate::key::SecretKey;
use crate::token::decode_trusted;
use crate::validation::TemporalValidator;
use serde_json::{Map, Value, json};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Authorization scheme prefix
pub const AUTH_SCHEME: &str = "Token ";

/// HTTP status for every rejection
pub const UNAUTHORIZED: u16 = 401;

/// Whether a route requires an authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Reject requests that do not authenticate
    Required,
    /// Treat requests that do not authenticate as anonymous
    Optional,
}

/// Why a request did not authenticate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    /// No `Authorization` header
    MissingHeader,
    /// Header present but not in the `Token <compact>` form
    InvalidHeader,
    /// Token rejected by the core
    Token(JwtError),
    /// Subject is not an integer user id
    InvalidSubject(String),
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthFailure::MissingHeader => f.write_str("missing authorization header"),
            AuthFailure::InvalidHeader => f.write_str("invalid authorization header"),
            AuthFailure::Token(e) => write!(f, "{e}"),
            AuthFailure::InvalidSubject(sub) => write!(f, "invalid subject: {sub}"),
        }
    }
}

impl From<JwtError> for AuthFailure {
    fn from(e: JwtError) -> Self {
        AuthFailure::Token(e)
    }
}

/// A rejected request, ready to be rendered as an HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRejection {
    failure: AuthFailure,
}

impl AuthRejection {
    /// HTTP status code
    #[must_use]
    pub fn status(&self) -> u16 {
        UNAUTHORIZED
    }

    /// Underlying failure
    #[must_use]
    pub fn failure(&self) -> &AuthFailure {
        &self.failure
    }

    /// Client-facing message
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self.failure {
            AuthFailure::MissingHeader => "missing authorization header",
            _ => "invalid authorization header",
        }
    }

    /// JSON error body: `{"errors": {"message": ..., "error": ...}}`
    #[must_use]
    pub fn body(&self) -> Value {
        let mut errors = Map::new();
        errors.insert("message".to_string(), json!(self.message()));
        match &self.failure {
            AuthFailure::MissingHeader | AuthFailure::InvalidHeader => {}
            failure => {
                errors.insert("error".to_string(), json!(failure.to_string()));
            }
        }
        json!({ "errors": errors })
    }
}

impl From<AuthFailure> for AuthRejection {
    fn from(failure: AuthFailure) -> Self {
        Self { failure }
    }
}

/// An authenticated caller
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    /// User id from the `sub` claim
    pub user_id: i64,
    /// Verified and validated claims
    pub claims: Claims,
}

/// Extract the compact token from an `Authorization` header value.
///
/// # Errors
/// `MissingHeader` when absent or empty, `InvalidHeader` when the scheme is
/// not `Token`.
pub fn extract_token(header: Option<&str>) -> Result<&str, AuthFailure> {
    match header {
        None | Some("") => Err(AuthFailure::MissingHeader),
        Some(value) => value
            .strip_prefix(AUTH_SCHEME)
            .ok_or(AuthFailure::InvalidHeader),
    }
}

/// Authenticates requests against a shared secret
#[derive(Debug, Clone)]
pub struct Authenticator {
    secret: Arc<SecretKey>,
    validator: TemporalValidator,
}

impl Authenticator {
    /// Authenticator with no clock-skew allowance
    #[must_use]
    pub fn new(secret: Arc<SecretKey>) -> Self {
        Self {
            secret,
            validator: TemporalValidator::new(),
        }
    }

    /// Use `validator` for `exp`/`nbf` checks
    #[must_use]
    pub fn with_validator(mut self, validator: TemporalValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Resolve the caller from an `Authorization` header value.
    ///
    /// # Errors
    /// Under [`AuthPolicy::Required`], any failure becomes an
    /// [`AuthRejection`]. Under [`AuthPolicy::Optional`], failures yield
    /// `Ok(None)` and the request proceeds anonymously.
    pub fn authenticate(
        &self,
        header: Option<&str>,
        policy: AuthPolicy,
    ) -> Result<Option<Principal>, AuthRejection> {
        match self.principal(header) {
            Ok(principal) => {
                debug!(user_id = principal.user_id, "Request authenticated");
                Ok(Some(principal))
            }
            Err(failure) => match policy {
                AuthPolicy::Optional => {
                    debug!(reason = %failure, "Proceeding anonymously");
                    Ok(None)
                }
                AuthPolicy::Required => {
                    warn!(reason = %failure, "Authentication rejected");
                    Err(failure.into())
                }
            },
        }
    }

    fn principal(&self, header: Option<&str>) -> Result<Principal, AuthFailure> {
        let compact = extract_token(header)?;
        let token = decode_trusted(compact, self.secret.expose())?.validate(&self.validator)?;
        let claims = token.into_claims();

        let subject = claims.subject()?;
        let user_id = subject
            .parse::<i64>()
            .map_err(|_| AuthFailure::InvalidSubject(subject.to_string()))?;

        Ok(Principal { user_id, claims })
    }
}

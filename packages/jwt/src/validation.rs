//! Temporal validation of `exp` and `nbf`.

use crate::claims::{Claims, registered};
use crate::error::{JwtError, JwtResult};
use chrono::{DateTime, Duration, Utc};

/// Checks expiration and not-before claims against a clock.
///
/// Call only on claims from a verified token. A missing `exp` or `nbf` skips
/// that check, so tokens without an expiry never expire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalValidator {
    leeway: Duration,
}

impl Default for TemporalValidator {
    fn default() -> Self {
        Self {
            leeway: Duration::zero(),
        }
    }
}

impl TemporalValidator {
    /// Validator with no clock-skew allowance
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow `leeway` of clock skew on both checks; negative values clamp to zero
    #[must_use]
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway.max(Duration::zero());
        self
    }

    /// Configured leeway
    #[must_use]
    pub fn leeway(&self) -> Duration {
        self.leeway
    }

    /// Validate against the current time.
    ///
    /// # Errors
    /// `TokenExpired`, `TokenNotYetValid`, or `InvalidClaimType` when `exp` or
    /// `nbf` is present but not an integer timestamp.
    pub fn validate(&self, claims: &Claims) -> JwtResult<()> {
        self.validate_at(claims, Utc::now())
    }

    /// Validate against an explicit instant.
    ///
    /// # Errors
    /// Same as [`TemporalValidator::validate`].
    pub fn validate_at(&self, claims: &Claims, now: DateTime<Utc>) -> JwtResult<()> {
        let now = now.timestamp();
        let leeway = self.leeway.num_seconds();

        if let Some(exp) = optional_timestamp(claims, registered::EXPIRATION_TIME)? {
            if exp.saturating_add(leeway) <= now {
                return Err(JwtError::TokenExpired);
            }
        }

        if let Some(nbf) = optional_timestamp(claims, registered::NOT_BEFORE)? {
            if nbf.saturating_sub(leeway) > now {
                return Err(JwtError::TokenNotYetValid);
            }
        }

        Ok(())
    }
}

/// Validate `claims` against the current time with no leeway.
///
/// # Errors
/// See [`TemporalValidator::validate`].
pub fn validate(claims: &Claims) -> JwtResult<()> {
    TemporalValidator::new().validate(claims)
}

fn optional_timestamp(claims: &Claims, key: &str) -> JwtResult<Option<i64>> {
    match claims.get_i64(key) {
        Ok(secs) => Ok(Some(secs)),
        Err(JwtError::ClaimNotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

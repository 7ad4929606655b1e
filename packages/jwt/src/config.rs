//! Token configuration and secret loading

use crate::algorithms::Algorithm;
use crate::error::{JwtError, JwtResult};
use crate::key::SecretKey;
use crate::validation::TemporalValidator;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Token subsystem configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Environment variable holding the signing secret
    #[serde(default = "default_secret_env")]
    pub secret_env: String,
    /// Algorithm for issued tokens
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Clock-skew allowance for `exp`/`nbf`, in seconds
    #[serde(default)]
    pub leeway_seconds: i64,
    /// Lifetime of issued tokens; `None` issues tokens without `exp`
    #[serde(default)]
    pub token_lifetime_seconds: Option<i64>,
    /// `iss` stamped on issued tokens
    #[serde(default)]
    pub issuer: Option<String>,
}

fn default_secret_env() -> String {
    "JWT_SECRET".to_string()
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret_env: default_secret_env(),
            algorithm: Algorithm::default(),
            leeway_seconds: 0,
            token_lifetime_seconds: None,
            issuer: None,
        }
    }
}

impl TokenConfig {
    /// Parse configuration from a JSON document; absent fields take defaults.
    ///
    /// # Errors
    /// Returns `Configuration` for malformed JSON, unknown algorithms, or
    /// durations rejected by [`TokenConfig::validate`].
    pub fn from_json(json: &str) -> JwtResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| JwtError::configuration(format!("invalid token config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configured durations are usable.
    ///
    /// # Errors
    /// Returns `Configuration` when `leeway_seconds` is negative or when
    /// `token_lifetime_seconds` is not positive, or when either does not fit a
    /// `chrono::Duration`.
    pub fn validate(&self) -> JwtResult<()> {
        self.leeway()?;
        self.token_lifetime()?;
        Ok(())
    }

    /// Temporal validator honouring `leeway_seconds`
    ///
    /// # Errors
    /// Returns `Configuration` for a negative or unrepresentable leeway.
    pub fn validator(&self) -> JwtResult<TemporalValidator> {
        Ok(TemporalValidator::new().with_leeway(self.leeway()?))
    }

    /// Lifetime of issued tokens; `None` when unbounded.
    ///
    /// # Errors
    /// Returns `Configuration` for a non-positive or unrepresentable lifetime.
    pub fn token_lifetime(&self) -> JwtResult<Option<Duration>> {
        let Some(secs) = self.token_lifetime_seconds else {
            return Ok(None);
        };
        if secs <= 0 {
            return Err(JwtError::configuration(format!(
                "token_lifetime_seconds must be positive, got {secs}"
            )));
        }
        Duration::try_seconds(secs).map(Some).ok_or_else(|| {
            JwtError::configuration(format!("token_lifetime_seconds out of range: {secs}"))
        })
    }

    fn leeway(&self) -> JwtResult<Duration> {
        let secs = self.leeway_seconds;
        if secs < 0 {
            return Err(JwtError::configuration(format!(
                "leeway_seconds must not be negative, got {secs}"
            )));
        }
        Duration::try_seconds(secs)
            .ok_or_else(|| JwtError::configuration(format!("leeway_seconds out of range: {secs}")))
    }

    /// Load the signing secret from the environment variable `secret_env`.
    ///
    /// # Errors
    /// Returns `Configuration` when the variable is unset, empty, or carries a
    /// malformed `hex:`/`base64:` value.
    pub fn load_secret(&self) -> JwtResult<SecretKey> {
        let value = std::env::var(&self.secret_env).map_err(|_| {
            JwtError::configuration(format!("secret env var {} not set", self.secret_env))
        })?;
        let key = decode_secret(&value)?;

        let recommended = self.algorithm.recommended_key_size();
        if key.len() < recommended {
            warn!(
                env = %self.secret_env,
                len = key.len(),
                recommended,
                "Signing secret is shorter than recommended for {}",
                self.algorithm
            );
        }

        Ok(key)
    }
}

/// Decode a secret: `hex:` and `base64:` prefixes select an encoding,
/// anything else is used as raw UTF-8 bytes.
///
/// # Errors
/// Returns `Configuration` for empty secrets or bad encodings.
pub fn decode_secret(value: &str) -> JwtResult<SecretKey> {
    let bytes = if let Some(encoded) = value.strip_prefix("hex:") {
        hex::decode(encoded)
            .map_err(|e| JwtError::configuration(format!("invalid hex secret: {e}")))?
    } else if let Some(encoded) = value.strip_prefix("base64:") {
        STANDARD
            .decode(encoded)
            .map_err(|e| JwtError::configuration(format!("invalid base64 secret: {e}")))?
    } else {
        value.as_bytes().to_vec()
    };

    if bytes.is_empty() {
        return Err(JwtError::configuration("signing secret is empty"));
    }
    Ok(SecretKey::new(bytes))
}

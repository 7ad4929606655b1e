//! Compact, self-contained, signed identity tokens
//!
//! This crate provides:
//! - A claims container with typed accessors for registered claims
//! - Canonical JSON + base64url serialization of header and claims
//! - HS256 signing and constant-time verification
//! - `exp`/`nbf` validation
//! - Typed token states so unverified claims cannot be mistaken for identity
//! - An authentication gate and token issuer for the HTTP layer
//!
//! ```
//! use realworld_jwt::{Token, decode_trusted, verify, JwtError};
//!
//! let mut token = Token::new();
//! token.claims_mut().set_subject("42");
//! let compact = token.sign(b"secret")?;
//!
//! verify(&compact, b"secret")?;
//! assert_eq!(verify(&compact, b"wrong"), Err(JwtError::InvalidSignature));
//!
//! let verified = decode_trusted(&compact, b"secret")?;
//! assert_eq!(verified.claims().subject()?, "42");
//! # Ok::<(), JwtError>(())
//! ```

pub mod algorithms;
pub mod auth;
pub mod claims;
pub mod config;
pub mod encoding;
mod error;
pub mod header;
pub mod issuer;
mod key;
pub mod signer;
pub mod token;
pub mod validation;
pub mod verifier;

pub use algorithms::Algorithm;
pub use auth::{AuthFailure, AuthPolicy, AuthRejection, Authenticator, Principal};
pub use claims::{ClaimValue, Claims};
pub use config::TokenConfig;
pub use error::{JwtError, JwtResult};
pub use header::{Header, TOKEN_TYPE};
pub use issuer::TokenIssuer;
pub use key::SecretKey;
pub use signer::sign;
pub use token::{
    ParsedToken, Received, Token, ValidatedToken, VerifiedToken, decode_trusted, parse, state,
};
pub use validation::{TemporalValidator, validate};
pub use verifier::verify;

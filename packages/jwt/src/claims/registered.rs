//! Registered claim names

/// Issuer
pub const ISSUER: &str = "iss";
/// Subject
pub const SUBJECT: &str = "sub";
/// Audience
pub const AUDIENCE: &str = "aud";
/// Expiration time (unix seconds)
pub const EXPIRATION_TIME: &str = "exp";
/// Not before (unix seconds)
pub const NOT_BEFORE: &str = "nbf";
/// Issued at (unix seconds)
pub const ISSUED_AT: &str = "iat";
/// Token ID
pub const TOKEN_ID: &str = "jti";

/// All registered claim names
pub const ALL: [&str; 7] = [
    ISSUER,
    SUBJECT,
    AUDIENCE,
    EXPIRATION_TIME,
    NOT_BEFORE,
    ISSUED_AT,
    TOKEN_ID,
];

/// Whether `name` is a registered claim name
#[must_use]
pub fn is_registered(name: &str) -> bool {
    ALL.contains(&name)
}

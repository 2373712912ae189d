//! JWT bearer-credential handling
//!
//! Tokens are issued by the external auth service; this side only verifies
//! them and extracts the customer identity. The booking core never sees an
//! unauthenticated create request.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::application::booking::CustomerIdentity;
use crate::shared::errors::DomainError;

/// JWT verification configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC secret shared with the auth service
    pub secret: String,
    /// Expected issuer claim
    pub issuer: String,
}

/// Claims carried by customer tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (customer ID)
    pub sub: String,
    /// Customer display name
    pub name: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

/// Verify a raw token and return its claims.
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, DomainError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| DomainError::Unauthorized(format!("Invalid token: {e}")))
}

/// Pull the customer identity out of an `Authorization` header value.
///
/// Missing or non-Bearer credentials are rejected here, before any booking
/// logic runs.
pub fn extract_identity(
    auth_header: Option<&str>,
    config: &JwtConfig,
) -> Result<CustomerIdentity, DomainError> {
    let header = auth_header
        .ok_or_else(|| DomainError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| DomainError::Unauthorized("Expected Bearer credential".to_string()))?;

    let claims = verify_token(token, config)?;
    Ok(CustomerIdentity {
        customer_id: claims.sub,
        customer_name: claims.name,
    })
}

/// Sign claims into a token. Used by tests and local tooling; production
/// tokens come from the auth service.
pub fn sign_token(claims: &Claims, config: &JwtConfig) -> Result<String, DomainError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| DomainError::Unauthorized(format!("Failed to sign token: {e}")))
}

// ── Tests ──────────────────────────────────────────────────────

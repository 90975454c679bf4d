//! JWT verification for the external identity provider.
//!
//! Sessions are issued and refreshed by the identity provider, not by
//! this service. We only verify the HS256 signature on incoming bearer
//! tokens and read the identity claims out of them.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,
}

/// Identity claims carried by provider-issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the provider's stable opaque user identifier.
    pub sub: String,
    /// Preferred username.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Avatar URL, when the provider has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issued at (Unix timestamp).
    pub iat: i64,
}

/// Default leeway in seconds for clock skew tolerance.
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Verifier for provider-issued tokens.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    leeway_secs: u64,
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtVerifier")
            .field("leeway_secs", &self.leeway_secs)
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl JwtVerifier {
    /// Creates a verifier from the shared secret the provider signs with.
    pub fn new(secret: &str) -> Self {
        Self::with_leeway(secret, DEFAULT_LEEWAY_SECS)
    }

    /// Creates a verifier with custom clock skew leeway.
    pub fn with_leeway(secret: &str, leeway_secs: u64) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            leeway_secs,
        }
    }

    /// Verify a token and return its identity claims.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway_secs;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                _ => JwtError::DecodingError(e.to_string()),
            })
    }
}

/// Sign claims with the shared secret. Only the identity provider does
/// this in production; kept here for tests and local tooling.
pub fn sign(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::DecodingError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn claims(exp_offset_secs: i64) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: "user_2x8f3k".to_string(),
            username: "cage_king".to_string(),
            name: "Marcus Chen".to_string(),
            avatar_url: None,
            exp: now + exp_offset_secs,
            iat: now,
        }
    }

    #[test]
    fn test_verify_round_trip() {
        let token = sign(&claims(3600), "test-secret").unwrap();
        let verified = JwtVerifier::new("test-secret").verify(&token).unwrap();
        assert_eq!(verified.sub, "user_2x8f3k");
        assert_eq!(verified.username, "cage_king");
        assert_eq!(verified.name, "Marcus Chen");
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = sign(&claims(3600), "test-secret").unwrap();
        let result = JwtVerifier::new("other-secret").verify(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let token = sign(&claims(-3600), "test-secret").unwrap();
        let result = JwtVerifier::new("test-secret").verify(&token);
        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_leeway_tolerates_recent_expiry() {
        let token = sign(&claims(-10), "test-secret").unwrap();
        // 30s default leeway covers a 10s-old expiry
        assert!(JwtVerifier::new("test-secret").verify(&token).is_ok());

        let strict = JwtVerifier::with_leeway("test-secret", 0);
        assert!(matches!(
            strict.verify(&token),
            Err(JwtError::TokenExpired)
        ));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let result = JwtVerifier::new("test-secret").verify("not.a.token");
        assert!(result.is_err());
    }
}

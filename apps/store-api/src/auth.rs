//! JWT authentication module.
//!
//! Handles bearer token generation and validation, plus the axum middleware
//! that gates every `/admin/*` route except login.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::ApiError;
use crate::SharedState;

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (admin email)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,
}

/// JWT token manager.
#[derive(Clone)]
pub struct TokenManager {
    secret: String,
    lifetime_secs: i64,
}

impl TokenManager {
    /// Create a new token manager.
    pub fn new(secret: String, lifetime_secs: i64) -> Self {
        TokenManager {
            secret,
            lifetime_secs,
        }
    }

    /// The configured token lifetime in seconds.
    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime_secs
    }

    /// Generate a bearer token bound to an admin email.
    pub fn issue(&self, email: &str) -> Result<String, ApiError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.lifetime_secs);

        let claims = Claims {
            sub: email.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ApiError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Validate and decode a token.
    ///
    /// Fails closed: malformed, tampered, and expired tokens are all
    /// Unauthorized, never Internal.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let validation = Validation::default();

        let token_data: TokenData<Claims> = decode(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| ApiError::Unauthorized(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }
}

/// Extract bearer token from an Authorization header value.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// Middleware: require a valid bearer token on every gated route.
///
/// Applied to the `/admin/*` router (login excepted). Missing, malformed,
/// and expired tokens all yield 401.
pub async fn require_admin(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let token = match header.and_then(extract_bearer_token) {
        Some(t) => t,
        None => {
            warn!(path = %req.uri().path(), "missing or malformed Authorization header");
            return Err(ApiError::Unauthorized(
                "Missing bearer token".to_string(),
            ));
        }
    };

    state.tokens.verify(token)?;

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_roundtrip() {
        let manager = TokenManager::new("test-secret".to_string(), 1800);

        let token = manager.issue("admin@example.com").unwrap();
        let claims = manager.verify(&token).unwrap();

        assert_eq!(claims.sub, "admin@example.com");
        assert_eq!(claims.exp - claims.iat, 1800);
    }

    #[test]
    fn test_expired_token_rejected() {
        // Issued already past its window (beyond the default decode leeway)
        let manager = TokenManager::new("test-secret".to_string(), -120);

        let token = manager.issue("admin@example.com").unwrap();
        let err = manager.verify(&token).unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = TokenManager::new("secret-a".to_string(), 1800);
        let verifier = TokenManager::new("secret-b".to_string(), 1800);

        let token = issuer.issue("admin@example.com").unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let manager = TokenManager::new("test-secret".to_string(), 1800);
        assert!(manager.verify("not.a.jwt").is_err());
        assert!(manager.verify("").is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc123"), Some("abc123"));
        assert_eq!(extract_bearer_token("bearer abc123"), None);
        assert_eq!(extract_bearer_token("Basic abc123"), None);
        assert_eq!(extract_bearer_token(""), None);
    }
}

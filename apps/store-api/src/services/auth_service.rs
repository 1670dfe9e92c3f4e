//! Admin authentication service.
//!
//! Validates credentials against stored argon2 hashes and issues the
//! time-bounded bearer tokens the `/admin/*` gate checks.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use velora_core::password::{hash_password, verify_password};
use velora_core::validation::{validate_email, validate_password};
use velora_core::AdminUser;
use velora_db::repository::generate_id;
use velora_db::Database;

use crate::auth::TokenManager;
use crate::error::ApiError;

// =============================================================================
// Request/Response Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateAdmin {
    pub email: String,
    pub password: String,
}

/// Public view of an admin account (never the hash).
#[derive(Debug, Serialize)]
pub struct AdminRead {
    pub id: String,
    pub email: String,
}

impl From<AdminUser> for AdminRead {
    fn from(admin: AdminUser) -> Self {
        AdminRead {
            id: admin.id,
            email: admin.email,
        }
    }
}

// =============================================================================
// Auth Service
// =============================================================================

/// Service for admin credential verification and token issuance.
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    tokens: TokenManager,
}

impl AuthService {
    /// Create a new auth service.
    pub fn new(db: Database, tokens: TokenManager) -> Self {
        AuthService { db, tokens }
    }

    /// Exchanges admin credentials for a bearer token.
    ///
    /// Unknown email and wrong password return the IDENTICAL Unauthorized
    /// message - the response must not reveal whether the email exists.
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, ApiError> {
        let admin = self.db.admins().get_by_email(&req.email).await?;

        let verified = match &admin {
            Some(admin) => verify_password(&req.password, &admin.password_hash),
            None => false,
        };

        if !verified {
            warn!(email = %req.email, "failed admin login attempt");
            return Err(ApiError::Unauthorized(
                "Incorrect email or password".to_string(),
            ));
        }

        let access_token = self.tokens.issue(&req.email)?;

        info!(email = %req.email, "admin logged in");

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.tokens.lifetime_secs(),
        })
    }

    /// Registers a new admin account; Conflict if the email is taken.
    ///
    /// Only the argon2 hash of the password is stored.
    pub async fn create_admin(&self, req: CreateAdmin) -> Result<AdminRead, ApiError> {
        validate_email(&req.email)?;
        validate_password(&req.password)?;

        if self.db.admins().get_by_email(&req.email).await?.is_some() {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash_password(&req.password)
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        let admin = AdminUser {
            id: generate_id(),
            email: req.email,
            password_hash,
            created_at: Utc::now(),
        };
        self.db.admins().insert(&admin).await?;

        info!(email = %admin.email, "admin account created");
        Ok(admin.into())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use velora_db::DbConfig;

    async fn service() -> AuthService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let tokens = TokenManager::new("test-secret".to_string(), 1800);
        AuthService::new(db, tokens)
    }

    async fn with_admin(auth: &AuthService) {
        auth.create_admin(CreateAdmin {
            email: "admin@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let auth = service().await;
        with_admin(&auth).await;

        let resp = auth
            .login(LoginRequest {
                email: "admin@example.com".to_string(),
                password: "hunter2hunter2".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(resp.token_type, "Bearer");
        assert_eq!(resp.expires_in, 1800);

        let claims = auth.tokens.verify(&resp.access_token).unwrap();
        assert_eq!(claims.sub, "admin@example.com");
    }

    #[tokio::test]
    async fn test_login_failure_does_not_reveal_account_existence() {
        let auth = service().await;
        with_admin(&auth).await;

        let wrong_password = auth
            .login(LoginRequest {
                email: "admin@example.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .unwrap_err();

        let unknown_email = auth
            .login(LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "hunter2hunter2".to_string(),
            })
            .await
            .unwrap_err();

        // Identical message either way
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert!(matches!(wrong_password, ApiError::Unauthorized(_)));
        assert!(matches!(unknown_email, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_duplicate_admin_email_is_conflict() {
        let auth = service().await;
        with_admin(&auth).await;

        let err = auth
            .create_admin(CreateAdmin {
                email: "admin@example.com".to_string(),
                password: "another-password".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_admin_validates_input() {
        let auth = service().await;

        let err = auth
            .create_admin(CreateAdmin {
                email: "not-an-email".to_string(),
                password: "hunter2hunter2".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let err = auth
            .create_admin(CreateAdmin {
                email: "admin@example.com".to_string(),
                password: "short".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_admin_read_never_exposes_hash() {
        let auth = service().await;

        let read = auth
            .create_admin(CreateAdmin {
                email: "admin@example.com".to_string(),
                password: "hunter2hunter2".to_string(),
            })
            .await
            .unwrap();

        let json = serde_json::to_value(&read).unwrap();
        assert_eq!(json["email"], "admin@example.com");
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
    }
}

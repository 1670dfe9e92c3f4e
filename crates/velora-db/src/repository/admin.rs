//! # Admin Repository
//!
//! Storage for administrator accounts. Only argon2 hashes are persisted;
//! credential verification happens in the auth service.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use velora_core::AdminUser;

/// Repository for admin user database operations.
#[derive(Debug, Clone)]
pub struct AdminRepository {
    pool: SqlitePool,
}

impl AdminRepository {
    /// Creates a new AdminRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AdminRepository { pool }
    }

    /// Inserts a new admin account.
    ///
    /// ## Returns
    /// * `Err(StoreError::UniqueViolation)` - email already registered
    pub async fn insert(&self, admin: &AdminUser) -> StoreResult<()> {
        debug!(id = %admin.id, email = %admin.email, "Inserting admin user");

        sqlx::query(
            r#"
            INSERT INTO admin_users (id, email, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&admin.id)
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(admin.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets an admin by ID.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<AdminUser>> {
        let admin = sqlx::query_as::<_, AdminUser>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM admin_users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    /// Gets an admin by email (the login identifier).
    pub async fn get_by_email(&self, email: &str) -> StoreResult<Option<AdminUser>> {
        let admin = sqlx::query_as::<_, AdminUser>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM admin_users
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    /// Deletes an admin account.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting admin user");

        let result = sqlx::query("DELETE FROM admin_users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Admin user", id));
        }

        Ok(())
    }

    /// Counts admin accounts (used by the seed binary for idempotence).
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Main Category Repository
//!
//! Database operations for the top level of the catalog hierarchy.
//!
//! Deleting a main category cascades (via schema foreign keys) to its
//! subcategories and their subgroups in a single statement.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use velora_core::MainCategory;

/// Repository for main category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Inserts a new main category.
    ///
    /// ## Returns
    /// * `Err(StoreError::UniqueViolation)` - name already exists
    pub async fn insert(&self, category: &MainCategory) -> StoreResult<()> {
        debug!(id = %category.id, name = %category.name, "Inserting main category");

        sqlx::query(
            r#"
            INSERT INTO main_categories (id, name, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a main category by ID.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<MainCategory>> {
        let category = sqlx::query_as::<_, MainCategory>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM main_categories
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Gets a main category by its (unique) name.
    pub async fn get_by_name(&self, name: &str) -> StoreResult<Option<MainCategory>> {
        let category = sqlx::query_as::<_, MainCategory>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM main_categories
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Lists all main categories in insertion order.
    pub async fn list(&self) -> StoreResult<Vec<MainCategory>> {
        let categories = sqlx::query_as::<_, MainCategory>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM main_categories
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Updates an existing main category.
    ///
    /// ## Returns
    /// * `Err(StoreError::NotFound)` - category doesn't exist
    pub async fn update(&self, category: &MainCategory) -> StoreResult<()> {
        debug!(id = %category.id, "Updating main category");

        let result = sqlx::query(
            r#"
            UPDATE main_categories SET
                name = ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Main category", &category.id));
        }

        Ok(())
    }

    /// Deletes a main category.
    ///
    /// Schema-level `ON DELETE CASCADE` removes all descendant subcategories
    /// and subgroups in the same statement.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting main category");

        let result = sqlx::query("DELETE FROM main_categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Main category", id));
        }

        Ok(())
    }

    /// Counts main categories (for diagnostics and tests).
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM main_categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

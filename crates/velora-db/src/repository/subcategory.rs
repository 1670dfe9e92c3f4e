//! # Subcategory Repository
//!
//! Database operations for the second level of the catalog hierarchy.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use velora_core::SubCategory;

/// Repository for subcategory database operations.
#[derive(Debug, Clone)]
pub struct SubCategoryRepository {
    pool: SqlitePool,
}

impl SubCategoryRepository {
    /// Creates a new SubCategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SubCategoryRepository { pool }
    }

    /// Inserts a new subcategory.
    ///
    /// The caller is responsible for having checked that
    /// `main_category_id` resolves; the schema FK is the backstop.
    pub async fn insert(&self, sub_category: &SubCategory) -> StoreResult<()> {
        debug!(
            id = %sub_category.id,
            main_category_id = %sub_category.main_category_id,
            "Inserting subcategory"
        );

        sqlx::query(
            r#"
            INSERT INTO sub_categories (id, name, main_category_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&sub_category.id)
        .bind(&sub_category.name)
        .bind(&sub_category.main_category_id)
        .bind(sub_category.created_at)
        .bind(sub_category.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a subcategory by ID.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<SubCategory>> {
        let sub_category = sqlx::query_as::<_, SubCategory>(
            r#"
            SELECT id, name, main_category_id, created_at, updated_at
            FROM sub_categories
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sub_category)
    }

    /// Lists all subcategories in insertion order.
    pub async fn list(&self) -> StoreResult<Vec<SubCategory>> {
        let sub_categories = sqlx::query_as::<_, SubCategory>(
            r#"
            SELECT id, name, main_category_id, created_at, updated_at
            FROM sub_categories
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sub_categories)
    }

    /// Lists subcategories belonging to a main category.
    pub async fn list_by_main_category(
        &self,
        main_category_id: &str,
    ) -> StoreResult<Vec<SubCategory>> {
        let sub_categories = sqlx::query_as::<_, SubCategory>(
            r#"
            SELECT id, name, main_category_id, created_at, updated_at
            FROM sub_categories
            WHERE main_category_id = ?1
            ORDER BY created_at
            "#,
        )
        .bind(main_category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sub_categories)
    }

    /// Updates an existing subcategory (name and/or parent).
    pub async fn update(&self, sub_category: &SubCategory) -> StoreResult<()> {
        debug!(id = %sub_category.id, "Updating subcategory");

        let result = sqlx::query(
            r#"
            UPDATE sub_categories SET
                name = ?2,
                main_category_id = ?3,
                updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(&sub_category.id)
        .bind(&sub_category.name)
        .bind(&sub_category.main_category_id)
        .bind(sub_category.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Subcategory", &sub_category.id));
        }

        Ok(())
    }

    /// Deletes a subcategory; its subgroups cascade via schema FK.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting subcategory");

        let result = sqlx::query("DELETE FROM sub_categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Subcategory", id));
        }

        Ok(())
    }

    /// Counts subcategories (for diagnostics and tests).
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sub_categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

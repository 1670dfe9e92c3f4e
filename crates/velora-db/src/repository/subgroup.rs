//! # Subgroup Repository
//!
//! Database operations for the third level of the catalog hierarchy.
//!
//! ## Delete Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Subgroup Deletion and Referencing Products                 │
//! │                                                                         │
//! │  delete(id)                                                             │
//! │     └── Removes the subgroup row ONLY. Products keep their             │
//! │         sub_group_id and are left referencing a missing subgroup       │
//! │         (the "detach" policy).                                         │
//! │                                                                         │
//! │  delete_with_products(id)                                              │
//! │     └── One transaction: delete referencing products, then the         │
//! │         subgroup (the "cascade" policy).                               │
//! │                                                                         │
//! │  The "restrict" policy is a service-level check (count, then refuse)   │
//! │  built on ProductRepository::count_by_sub_group.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use velora_core::SubGroup;

/// Repository for subgroup database operations.
#[derive(Debug, Clone)]
pub struct SubGroupRepository {
    pool: SqlitePool,
}

impl SubGroupRepository {
    /// Creates a new SubGroupRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SubGroupRepository { pool }
    }

    /// Inserts a new subgroup.
    pub async fn insert(&self, sub_group: &SubGroup) -> StoreResult<()> {
        debug!(
            id = %sub_group.id,
            sub_category_id = %sub_group.sub_category_id,
            "Inserting subgroup"
        );

        sqlx::query(
            r#"
            INSERT INTO sub_groups (id, name, sub_category_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&sub_group.id)
        .bind(&sub_group.name)
        .bind(&sub_group.sub_category_id)
        .bind(sub_group.created_at)
        .bind(sub_group.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a subgroup by ID.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<SubGroup>> {
        let sub_group = sqlx::query_as::<_, SubGroup>(
            r#"
            SELECT id, name, sub_category_id, created_at, updated_at
            FROM sub_groups
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sub_group)
    }

    /// Lists all subgroups in insertion order.
    pub async fn list(&self) -> StoreResult<Vec<SubGroup>> {
        let sub_groups = sqlx::query_as::<_, SubGroup>(
            r#"
            SELECT id, name, sub_category_id, created_at, updated_at
            FROM sub_groups
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sub_groups)
    }

    /// Lists subgroups belonging to a subcategory.
    pub async fn list_by_sub_category(&self, sub_category_id: &str) -> StoreResult<Vec<SubGroup>> {
        let sub_groups = sqlx::query_as::<_, SubGroup>(
            r#"
            SELECT id, name, sub_category_id, created_at, updated_at
            FROM sub_groups
            WHERE sub_category_id = ?1
            ORDER BY created_at
            "#,
        )
        .bind(sub_category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sub_groups)
    }

    /// Updates an existing subgroup (name and/or parent).
    pub async fn update(&self, sub_group: &SubGroup) -> StoreResult<()> {
        debug!(id = %sub_group.id, "Updating subgroup");

        let result = sqlx::query(
            r#"
            UPDATE sub_groups SET
                name = ?2,
                sub_category_id = ?3,
                updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(&sub_group.id)
        .bind(&sub_group.name)
        .bind(&sub_group.sub_category_id)
        .bind(sub_group.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Subgroup", &sub_group.id));
        }

        Ok(())
    }

    /// Deletes a subgroup, leaving any referencing products in place.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting subgroup (detach)");

        let result = sqlx::query("DELETE FROM sub_groups WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Subgroup", id));
        }

        Ok(())
    }

    /// Deletes a subgroup AND its referencing products in one transaction.
    ///
    /// ## Returns
    /// The number of products removed alongside the subgroup.
    pub async fn delete_with_products(&self, id: &str) -> StoreResult<u64> {
        debug!(id = %id, "Deleting subgroup (cascade to products)");

        let mut tx = self.pool.begin().await?;

        let products = sqlx::query("DELETE FROM products WHERE sub_group_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM sub_groups WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // Rolls back the product deletes on drop
            return Err(StoreError::not_found("Subgroup", id));
        }

        tx.commit().await?;

        Ok(products.rows_affected())
    }

    /// Counts subgroups (for diagnostics and tests).
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sub_groups")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::generate_id;
    use chrono::Utc;
    use velora_core::{MainCategory, Product, SubCategory};

    /// Builds a category → subcategory → subgroup chain and returns it.
    async fn hierarchy(db: &Database) -> (MainCategory, SubCategory, SubGroup) {
        let now = Utc::now();

        let cat = MainCategory {
            id: generate_id(),
            name: "Men".to_string(),
            created_at: now,
            updated_at: now,
        };
        db.categories().insert(&cat).await.unwrap();

        let sub = SubCategory {
            id: generate_id(),
            name: "Shoes".to_string(),
            main_category_id: cat.id.clone(),
            created_at: now,
            updated_at: now,
        };
        db.sub_categories().insert(&sub).await.unwrap();

        let group = SubGroup {
            id: generate_id(),
            name: "Running".to_string(),
            sub_category_id: sub.id.clone(),
            created_at: now,
            updated_at: now,
        };
        db.sub_groups().insert(&group).await.unwrap();

        (cat, sub, group)
    }

    fn product(title: &str, cat: &MainCategory, sub: &SubCategory, group: &SubGroup) -> Product {
        let now = Utc::now();
        Product {
            id: generate_id(),
            title: title.to_string(),
            description: None,
            price_cents: 9999,
            main_category_id: cat.id.clone(),
            sub_category_id: sub.id.clone(),
            sub_group_id: group.id.clone(),
            colors: vec!["Black".to_string()],
            sizes: vec![8.0],
            assets: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_detach_delete_leaves_products_dangling() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (cat, sub, group) = hierarchy(&db).await;

        let p = product("Trail Runner", &cat, &sub, &group);
        db.products().insert(&p).await.unwrap();

        db.sub_groups().delete(&group.id).await.unwrap();

        // Product survives, still naming the now-missing subgroup
        let survivor = db.products().get_by_id(&p.id).await.unwrap().unwrap();
        assert_eq!(survivor.sub_group_id, group.id);
        assert!(db.sub_groups().get_by_id(&group.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_with_products_removes_both() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (cat, sub, group) = hierarchy(&db).await;

        db.products()
            .insert(&product("Trail Runner", &cat, &sub, &group))
            .await
            .unwrap();
        db.products()
            .insert(&product("City Walker", &cat, &sub, &group))
            .await
            .unwrap();

        let removed = db.sub_groups().delete_with_products(&group.id).await.unwrap();

        assert_eq!(removed, 2);
        assert_eq!(db.products().count().await.unwrap(), 0);
        assert!(db.sub_groups().get_by_id(&group.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_with_products_missing_subgroup_rolls_back() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (cat, sub, group) = hierarchy(&db).await;

        let p = product("Trail Runner", &cat, &sub, &group);
        db.products().insert(&p).await.unwrap();

        // Wrong id: the transaction must not eat the products
        let err = db.sub_groups().delete_with_products("missing").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(db.products().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_reparents_subgroup() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (_cat, sub, mut group) = hierarchy(&db).await;

        let now = Utc::now();
        let other = SubCategory {
            id: generate_id(),
            name: "Apparel".to_string(),
            main_category_id: sub.main_category_id.clone(),
            created_at: now,
            updated_at: now,
        };
        db.sub_categories().insert(&other).await.unwrap();

        group.sub_category_id = other.id.clone();
        group.updated_at = now;
        db.sub_groups().update(&group).await.unwrap();

        let fetched = db.sub_groups().get_by_id(&group.id).await.unwrap().unwrap();
        assert_eq!(fetched.sub_category_id, other.id);

        let listed = db.sub_groups().list_by_sub_category(&other.id).await.unwrap();
        assert_eq!(listed.len(), 1);
    }
}

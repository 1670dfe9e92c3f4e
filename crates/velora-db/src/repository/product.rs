//! # Product Repository
//!
//! Database operations for products.
//!
//! ## JSON Columns
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Product Row ↔ Domain Type                              │
//! │                                                                         │
//! │  products table                         velora_core::Product           │
//! │  ┌──────────────────────┐               ┌──────────────────────┐       │
//! │  │ colors TEXT '["Red"]'│ ──parse────►  │ colors: Vec<String>  │       │
//! │  │ sizes  TEXT '[6,6.5]'│ ──parse────►  │ sizes:  Vec<f64>     │       │
//! │  │ assets TEXT '[...]'  │ ──parse────►  │ assets: Vec<String>  │       │
//! │  └──────────────────────┘               └──────────────────────┘       │
//! │                                                                         │
//! │  A row whose JSON doesn't parse yields StoreError::CorruptPayload -    │
//! │  it means something wrote to the table outside this repository.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use velora_core::Product;

/// Raw product row; JSON columns are still TEXT.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ProductRow {
    id: String,
    title: String,
    description: Option<String>,
    price_cents: i64,
    main_category_id: String,
    sub_category_id: String,
    sub_group_id: String,
    colors: String,
    sizes: String,
    assets: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl ProductRow {
    fn into_product(self) -> StoreResult<Product> {
        let colors = serde_json::from_str(&self.colors)
            .map_err(|e| StoreError::corrupt("Product.colors", e.to_string()))?;
        let sizes = serde_json::from_str(&self.sizes)
            .map_err(|e| StoreError::corrupt("Product.sizes", e.to_string()))?;
        let assets = serde_json::from_str(&self.assets)
            .map_err(|e| StoreError::corrupt("Product.assets", e.to_string()))?;

        Ok(Product {
            id: self.id,
            title: self.title,
            description: self.description,
            price_cents: self.price_cents,
            main_category_id: self.main_category_id,
            sub_category_id: self.sub_category_id,
            sub_group_id: self.sub_group_id,
            colors,
            sizes,
            assets,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const PRODUCT_COLUMNS: &str = r#"
    id, title, description, price_cents,
    main_category_id, sub_category_id, sub_group_id,
    colors, sizes, assets,
    created_at, updated_at
"#;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Err(StoreError::UniqueViolation)` - title already exists
    pub async fn insert(&self, product: &Product) -> StoreResult<()> {
        debug!(id = %product.id, title = %product.title, "Inserting product");

        let colors = serde_json::to_string(&product.colors)
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        let sizes = serde_json::to_string(&product.sizes)
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        let assets = serde_json::to_string(&product.assets)
            .map_err(|e| StoreError::Internal(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO products (
                id, title, description, price_cents,
                main_category_id, sub_category_id, sub_group_id,
                colors, sizes, assets,
                created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6, ?7,
                ?8, ?9, ?10,
                ?11, ?12
            )
            "#,
        )
        .bind(&product.id)
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(&product.main_category_id)
        .bind(&product.sub_category_id)
        .bind(&product.sub_group_id)
        .bind(colors)
        .bind(sizes)
        .bind(assets)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE id = ?1", PRODUCT_COLUMNS);

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ProductRow::into_product).transpose()
    }

    /// Gets a product by its (globally unique) title.
    pub async fn get_by_title(&self, title: &str) -> StoreResult<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE title = ?1", PRODUCT_COLUMNS);

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(title)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ProductRow::into_product).transpose()
    }

    /// Lists all products in insertion order.
    pub async fn list(&self) -> StoreResult<Vec<Product>> {
        let sql = format!("SELECT {} FROM products ORDER BY created_at", PRODUCT_COLUMNS);

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    /// Lists products under a main category.
    pub async fn list_by_main_category(&self, main_category_id: &str) -> StoreResult<Vec<Product>> {
        self.list_by_column("main_category_id", main_category_id).await
    }

    /// Lists products under a subcategory.
    pub async fn list_by_sub_category(&self, sub_category_id: &str) -> StoreResult<Vec<Product>> {
        self.list_by_column("sub_category_id", sub_category_id).await
    }

    /// Lists products under a subgroup.
    pub async fn list_by_sub_group(&self, sub_group_id: &str) -> StoreResult<Vec<Product>> {
        self.list_by_column("sub_group_id", sub_group_id).await
    }

    /// Shared browse query; `column` is one of the three hierarchy columns.
    async fn list_by_column(&self, column: &str, value: &str) -> StoreResult<Vec<Product>> {
        let sql = format!(
            "SELECT {} FROM products WHERE {} = ?1 ORDER BY created_at",
            PRODUCT_COLUMNS, column
        );

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    /// Updates an existing product, writing every field.
    ///
    /// Partial-update merging happens in the catalog service; by the time a
    /// product reaches this method it is the complete new state.
    pub async fn update(&self, product: &Product) -> StoreResult<()> {
        debug!(id = %product.id, "Updating product");

        let colors = serde_json::to_string(&product.colors)
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        let sizes = serde_json::to_string(&product.sizes)
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        let assets = serde_json::to_string(&product.assets)
            .map_err(|e| StoreError::Internal(e.to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE products SET
                title = ?2,
                description = ?3,
                price_cents = ?4,
                main_category_id = ?5,
                sub_category_id = ?6,
                sub_group_id = ?7,
                colors = ?8,
                sizes = ?9,
                assets = ?10,
                updated_at = ?11
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(&product.main_category_id)
        .bind(&product.sub_category_id)
        .bind(&product.sub_group_id)
        .bind(colors)
        .bind(sizes)
        .bind(assets)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Deletes a product.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products referencing a subgroup (for the restrict policy).
    pub async fn count_by_sub_group(&self, sub_group_id: &str) -> StoreResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE sub_group_id = ?1")
                .bind(sub_group_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Counts all products (for diagnostics and tests).
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

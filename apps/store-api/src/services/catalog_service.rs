//! Catalog hierarchy service.
//!
//! Enforces the 4-level tree invariants:
//! - main category names are unique (at that level only)
//! - subcategories and subgroups require an existing parent
//! - products require all three hierarchy references to resolve, checked
//!   independently (a product's main/sub/group ids are NOT required to form
//!   a connected path - that is the source system's contract)
//! - product titles are globally unique
//!
//! Also owns the configurable subgroup delete policy and the eagerly
//! materialized tree read.

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use velora_core::validation::{validate_name, validate_price_cents, validate_title};
use velora_core::{
    CategoryTreeNode, MainCategory, Product, SubCategory, SubCategoryTreeNode, SubGroup,
    SubGroupDeletePolicy, SubGroupTreeNode,
};
use velora_db::repository::generate_id;
use velora_db::Database;

use crate::error::ApiError;

// =============================================================================
// Request Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSubCategory {
    pub name: String,
    pub main_category_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSubCategory {
    pub name: Option<String>,
    pub main_category_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSubGroup {
    pub name: String,
    pub sub_category_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSubGroup {
    pub name: Option<String>,
    pub sub_category_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProduct {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_cents: i64,
    pub main_category_id: String,
    pub sub_category_id: String,
    pub sub_group_id: String,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<f64>,
    #[serde(default)]
    pub assets: Vec<String>,
}

/// Partial product update.
///
/// `description` is double-wrapped so `null` (clear the field) is
/// distinguished from absent (leave untouched); every other field treats
/// absent as untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProduct {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub price_cents: Option<i64>,
    pub main_category_id: Option<String>,
    pub sub_category_id: Option<String>,
    pub sub_group_id: Option<String>,
    pub colors: Option<Vec<String>>,
    pub sizes: Option<Vec<f64>>,
    pub assets: Option<Vec<String>>,
}

/// Deserializes a present field (null or value) as `Some(inner)`; a missing
/// field stays `None` via `#[serde(default)]`.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

/// Result of a subgroup deletion, reporting what the policy did.
#[derive(Debug, Serialize)]
pub struct SubGroupDeleted {
    pub id: String,
    pub products_removed: u64,
}

// =============================================================================
// Catalog Service
// =============================================================================

/// Service enforcing catalog hierarchy invariants.
#[derive(Clone)]
pub struct CatalogService {
    db: Database,
    subgroup_delete_policy: SubGroupDeletePolicy,
}

impl CatalogService {
    /// Create a new catalog service.
    pub fn new(db: Database, subgroup_delete_policy: SubGroupDeletePolicy) -> Self {
        CatalogService {
            db,
            subgroup_delete_policy,
        }
    }

    // =========================================================================
    // Main Categories
    // =========================================================================

    /// Creates a main category; Conflict if the name is taken.
    pub async fn create_category(&self, req: CreateCategory) -> Result<MainCategory, ApiError> {
        validate_name(&req.name)?;

        if self.db.categories().get_by_name(&req.name).await?.is_some() {
            return Err(ApiError::Conflict(
                "Main category name already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let category = MainCategory {
            id: generate_id(),
            name: req.name,
            created_at: now,
            updated_at: now,
        };
        self.db.categories().insert(&category).await?;

        info!(id = %category.id, name = %category.name, "Main category created");
        Ok(category)
    }

    pub async fn list_categories(&self) -> Result<Vec<MainCategory>, ApiError> {
        Ok(self.db.categories().list().await?)
    }

    pub async fn get_category(&self, id: &str) -> Result<MainCategory, ApiError> {
        self.db
            .categories()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Main category not found".to_string()))
    }

    /// Renames a main category. Uniqueness is re-checked only when the name
    /// actually changes.
    pub async fn update_category(
        &self,
        id: &str,
        req: UpdateCategory,
    ) -> Result<MainCategory, ApiError> {
        let mut category = self.get_category(id).await?;

        if let Some(name) = req.name {
            if name != category.name {
                validate_name(&name)?;
                if self.db.categories().get_by_name(&name).await?.is_some() {
                    return Err(ApiError::Conflict(
                        "Main category name already exists".to_string(),
                    ));
                }
                category.name = name;
            }
        }

        category.updated_at = Utc::now();
        self.db.categories().update(&category).await?;
        Ok(category)
    }

    /// Deletes a main category; descendants cascade.
    pub async fn delete_category(&self, id: &str) -> Result<(), ApiError> {
        self.db.categories().delete(id).await?;
        info!(id = %id, "Main category deleted (descendants cascaded)");
        Ok(())
    }

    // =========================================================================
    // Subcategories
    // =========================================================================

    /// Creates a subcategory; NotFound if the parent doesn't resolve.
    pub async fn create_sub_category(
        &self,
        req: CreateSubCategory,
    ) -> Result<SubCategory, ApiError> {
        validate_name(&req.name)?;

        if self
            .db
            .categories()
            .get_by_id(&req.main_category_id)
            .await?
            .is_none()
        {
            return Err(ApiError::NotFound("Main category not found".to_string()));
        }

        let now = Utc::now();
        let sub_category = SubCategory {
            id: generate_id(),
            name: req.name,
            main_category_id: req.main_category_id,
            created_at: now,
            updated_at: now,
        };
        self.db.sub_categories().insert(&sub_category).await?;

        info!(id = %sub_category.id, "Subcategory created");
        Ok(sub_category)
    }

    pub async fn list_sub_categories(&self) -> Result<Vec<SubCategory>, ApiError> {
        Ok(self.db.sub_categories().list().await?)
    }

    pub async fn get_sub_category(&self, id: &str) -> Result<SubCategory, ApiError> {
        self.db
            .sub_categories()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Subcategory not found".to_string()))
    }

    /// Partially updates a subcategory. A new parent id is validated for
    /// existence only when that field is being changed.
    pub async fn update_sub_category(
        &self,
        id: &str,
        req: UpdateSubCategory,
    ) -> Result<SubCategory, ApiError> {
        let mut sub_category = self.get_sub_category(id).await?;

        if let Some(name) = req.name {
            validate_name(&name)?;
            sub_category.name = name;
        }

        if let Some(main_category_id) = req.main_category_id {
            if self
                .db
                .categories()
                .get_by_id(&main_category_id)
                .await?
                .is_none()
            {
                return Err(ApiError::NotFound("Main category not found".to_string()));
            }
            sub_category.main_category_id = main_category_id;
        }

        sub_category.updated_at = Utc::now();
        self.db.sub_categories().update(&sub_category).await?;
        Ok(sub_category)
    }

    /// Deletes a subcategory; its subgroups cascade.
    pub async fn delete_sub_category(&self, id: &str) -> Result<(), ApiError> {
        self.db.sub_categories().delete(id).await?;
        info!(id = %id, "Subcategory deleted (subgroups cascaded)");
        Ok(())
    }

    // =========================================================================
    // Subgroups
    // =========================================================================

    /// Creates a subgroup; NotFound if the parent doesn't resolve.
    pub async fn create_sub_group(&self, req: CreateSubGroup) -> Result<SubGroup, ApiError> {
        validate_name(&req.name)?;

        if self
            .db
            .sub_categories()
            .get_by_id(&req.sub_category_id)
            .await?
            .is_none()
        {
            return Err(ApiError::NotFound("Subcategory not found".to_string()));
        }

        let now = Utc::now();
        let sub_group = SubGroup {
            id: generate_id(),
            name: req.name,
            sub_category_id: req.sub_category_id,
            created_at: now,
            updated_at: now,
        };
        self.db.sub_groups().insert(&sub_group).await?;

        info!(id = %sub_group.id, "Subgroup created");
        Ok(sub_group)
    }

    pub async fn list_sub_groups(&self) -> Result<Vec<SubGroup>, ApiError> {
        Ok(self.db.sub_groups().list().await?)
    }

    pub async fn get_sub_group(&self, id: &str) -> Result<SubGroup, ApiError> {
        self.db
            .sub_groups()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Subgroup not found".to_string()))
    }

    /// Partially updates a subgroup.
    pub async fn update_sub_group(
        &self,
        id: &str,
        req: UpdateSubGroup,
    ) -> Result<SubGroup, ApiError> {
        let mut sub_group = self.get_sub_group(id).await?;

        if let Some(name) = req.name {
            validate_name(&name)?;
            sub_group.name = name;
        }

        if let Some(sub_category_id) = req.sub_category_id {
            if self
                .db
                .sub_categories()
                .get_by_id(&sub_category_id)
                .await?
                .is_none()
            {
                return Err(ApiError::NotFound("Subcategory not found".to_string()));
            }
            sub_group.sub_category_id = sub_category_id;
        }

        sub_group.updated_at = Utc::now();
        self.db.sub_groups().update(&sub_group).await?;
        Ok(sub_group)
    }

    /// Deletes a subgroup under the configured policy.
    ///
    /// ## Policies
    /// - `Detach` (default): products survive, referencing a missing subgroup
    /// - `Restrict`: Conflict while any product references the subgroup
    /// - `Cascade`: referencing products are removed in the same transaction
    pub async fn delete_sub_group(&self, id: &str) -> Result<SubGroupDeleted, ApiError> {
        let products_removed = match self.subgroup_delete_policy {
            SubGroupDeletePolicy::Detach => {
                self.db.sub_groups().delete(id).await?;
                0
            }
            SubGroupDeletePolicy::Restrict => {
                let referencing = self.db.products().count_by_sub_group(id).await?;
                if referencing > 0 {
                    return Err(ApiError::Conflict(format!(
                        "Subgroup is referenced by {} product(s)",
                        referencing
                    )));
                }
                self.db.sub_groups().delete(id).await?;
                0
            }
            SubGroupDeletePolicy::Cascade => self.db.sub_groups().delete_with_products(id).await?,
        };

        info!(
            id = %id,
            policy = ?self.subgroup_delete_policy,
            products_removed,
            "Subgroup deleted"
        );

        Ok(SubGroupDeleted {
            id: id.to_string(),
            products_removed,
        })
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Creates a product.
    ///
    /// Each hierarchy reference is checked independently; there is no
    /// validation that the subcategory belongs to the main category or the
    /// subgroup to the subcategory. Titles are globally unique.
    pub async fn create_product(&self, req: CreateProduct) -> Result<Product, ApiError> {
        validate_title(&req.title)?;
        validate_price_cents(req.price_cents)?;

        self.check_product_refs(
            Some(&req.main_category_id),
            Some(&req.sub_category_id),
            Some(&req.sub_group_id),
        )
        .await?;

        if self.db.products().get_by_title(&req.title).await?.is_some() {
            return Err(ApiError::Conflict(
                "Product title already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let product = Product {
            id: generate_id(),
            title: req.title,
            description: req.description,
            price_cents: req.price_cents,
            main_category_id: req.main_category_id,
            sub_category_id: req.sub_category_id,
            sub_group_id: req.sub_group_id,
            colors: req.colors,
            sizes: req.sizes,
            assets: req.assets,
            created_at: now,
            updated_at: now,
        };
        self.db.products().insert(&product).await?;

        info!(id = %product.id, title = %product.title, "Product created");
        Ok(product)
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        Ok(self.db.products().list().await?)
    }

    pub async fn products_by_main_category(&self, id: &str) -> Result<Vec<Product>, ApiError> {
        Ok(self.db.products().list_by_main_category(id).await?)
    }

    pub async fn products_by_sub_category(&self, id: &str) -> Result<Vec<Product>, ApiError> {
        Ok(self.db.products().list_by_sub_category(id).await?)
    }

    pub async fn products_by_sub_group(&self, id: &str) -> Result<Vec<Product>, ApiError> {
        Ok(self.db.products().list_by_sub_group(id).await?)
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, ApiError> {
        self.db
            .products()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))
    }

    /// Partially updates a product.
    ///
    /// Only supplied fields are validated and written; everything else keeps
    /// its prior value. `description: null` clears the field, absent leaves
    /// it untouched.
    pub async fn update_product(&self, id: &str, req: UpdateProduct) -> Result<Product, ApiError> {
        let mut product = self.get_product(id).await?;

        self.check_product_refs(
            req.main_category_id.as_deref(),
            req.sub_category_id.as_deref(),
            req.sub_group_id.as_deref(),
        )
        .await?;

        if let Some(title) = req.title {
            if title != product.title {
                validate_title(&title)?;
                if self.db.products().get_by_title(&title).await?.is_some() {
                    return Err(ApiError::Conflict(
                        "Product title already exists".to_string(),
                    ));
                }
                product.title = title;
            }
        }

        if let Some(description) = req.description {
            product.description = description;
        }
        if let Some(price_cents) = req.price_cents {
            validate_price_cents(price_cents)?;
            product.price_cents = price_cents;
        }
        if let Some(main_category_id) = req.main_category_id {
            product.main_category_id = main_category_id;
        }
        if let Some(sub_category_id) = req.sub_category_id {
            product.sub_category_id = sub_category_id;
        }
        if let Some(sub_group_id) = req.sub_group_id {
            product.sub_group_id = sub_group_id;
        }
        if let Some(colors) = req.colors {
            product.colors = colors;
        }
        if let Some(sizes) = req.sizes {
            product.sizes = sizes;
        }
        if let Some(assets) = req.assets {
            product.assets = assets;
        }

        product.updated_at = Utc::now();
        self.db.products().update(&product).await?;
        Ok(product)
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), ApiError> {
        self.db.products().delete(id).await?;
        info!(id = %id, "Product deleted");
        Ok(())
    }

    /// Validates whichever hierarchy references are supplied, each
    /// independently, in top-down order.
    async fn check_product_refs(
        &self,
        main_category_id: Option<&str>,
        sub_category_id: Option<&str>,
        sub_group_id: Option<&str>,
    ) -> Result<(), ApiError> {
        if let Some(id) = main_category_id {
            if self.db.categories().get_by_id(id).await?.is_none() {
                return Err(ApiError::NotFound("Main category not found".to_string()));
            }
        }
        if let Some(id) = sub_category_id {
            if self.db.sub_categories().get_by_id(id).await?.is_none() {
                return Err(ApiError::NotFound("Subcategory not found".to_string()));
            }
        }
        if let Some(id) = sub_group_id {
            if self.db.sub_groups().get_by_id(id).await?.is_none() {
                return Err(ApiError::NotFound("Subgroup not found".to_string()));
            }
        }
        Ok(())
    }

    // =========================================================================
    // Tree Read
    // =========================================================================

    /// Eagerly materializes the full catalog tree: every main category with
    /// its subcategories and their subgroups. No product data.
    ///
    /// Three list queries and in-memory grouping; every level is in
    /// insertion (`created_at`) order.
    pub async fn full_tree(&self) -> Result<Vec<CategoryTreeNode>, ApiError> {
        let categories = self.db.categories().list().await?;
        let sub_categories = self.db.sub_categories().list().await?;
        let sub_groups = self.db.sub_groups().list().await?;

        use std::collections::HashMap;

        let mut groups_by_parent: HashMap<String, Vec<SubGroupTreeNode>> = HashMap::new();
        for group in sub_groups {
            groups_by_parent
                .entry(group.sub_category_id)
                .or_default()
                .push(SubGroupTreeNode {
                    id: group.id,
                    name: group.name,
                });
        }

        let mut subs_by_parent: HashMap<String, Vec<SubCategoryTreeNode>> = HashMap::new();
        for sub in sub_categories {
            let sub_groups = groups_by_parent.remove(&sub.id).unwrap_or_default();
            subs_by_parent
                .entry(sub.main_category_id)
                .or_default()
                .push(SubCategoryTreeNode {
                    id: sub.id,
                    name: sub.name,
                    sub_groups,
                });
        }

        let tree = categories
            .into_iter()
            .map(|category| CategoryTreeNode {
                sub_categories: subs_by_parent.remove(&category.id).unwrap_or_default(),
                id: category.id,
                name: category.name,
            })
            .collect();

        Ok(tree)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use velora_db::DbConfig;

    async fn service(policy: SubGroupDeletePolicy) -> CatalogService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        CatalogService::new(db, policy)
    }

    /// Builds Men → Shoes → Running via the service and returns the ids.
    async fn hierarchy(catalog: &CatalogService) -> (String, String, String) {
        let cat = catalog
            .create_category(CreateCategory {
                name: "Men".to_string(),
            })
            .await
            .unwrap();
        let sub = catalog
            .create_sub_category(CreateSubCategory {
                name: "Shoes".to_string(),
                main_category_id: cat.id.clone(),
            })
            .await
            .unwrap();
        let group = catalog
            .create_sub_group(CreateSubGroup {
                name: "Running".to_string(),
                sub_category_id: sub.id.clone(),
            })
            .await
            .unwrap();
        (cat.id, sub.id, group.id)
    }

    fn product_request(title: &str, main: &str, sub: &str, group: &str) -> CreateProduct {
        CreateProduct {
            title: title.to_string(),
            description: Some("Daily trainer".to_string()),
            price_cents: 12999,
            main_category_id: main.to_string(),
            sub_category_id: sub.to_string(),
            sub_group_id: group.to_string(),
            colors: vec!["Black".to_string()],
            sizes: vec![8.0, 8.5],
            assets: vec!["https://cdn.example.com/a.jpg".to_string()],
        }
    }

    #[tokio::test]
    async fn test_duplicate_category_name_is_conflict() {
        let catalog = service(SubGroupDeletePolicy::Detach).await;

        catalog
            .create_category(CreateCategory {
                name: "Men".to_string(),
            })
            .await
            .unwrap();

        let err = catalog
            .create_category(CreateCategory {
                name: "Men".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_sub_category_requires_existing_parent() {
        let catalog = service(SubGroupDeletePolicy::Detach).await;

        let err = catalog
            .create_sub_category(CreateSubCategory {
                name: "Shoes".to_string(),
                main_category_id: "missing".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_product_refs_checked_independently() {
        let catalog = service(SubGroupDeletePolicy::Detach).await;
        let (main, sub, _group) = hierarchy(&catalog).await;

        // Valid main and sub, missing group: the group check still fires
        let err = catalog
            .create_product(product_request("Trail Runner", &main, &sub, "missing"))
            .await
            .unwrap_err();
        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, "Subgroup not found"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_duplicate_product_title_is_conflict() {
        let catalog = service(SubGroupDeletePolicy::Detach).await;
        let (main, sub, group) = hierarchy(&catalog).await;

        catalog
            .create_product(product_request("Trail Runner", &main, &sub, &group))
            .await
            .unwrap();

        let err = catalog
            .create_product(product_request("Trail Runner", &main, &sub, &group))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_partial_update_leaves_other_fields_untouched() {
        let catalog = service(SubGroupDeletePolicy::Detach).await;
        let (main, sub, group) = hierarchy(&catalog).await;

        let created = catalog
            .create_product(product_request("Trail Runner", &main, &sub, &group))
            .await
            .unwrap();

        // Only the price changes
        let updated = catalog
            .update_product(
                &created.id,
                UpdateProduct {
                    price_cents: Some(9999),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price_cents, 9999);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.colors, created.colors);
        assert_eq!(updated.sizes, created.sizes);
        assert_eq!(updated.assets, created.assets);
        assert_eq!(updated.sub_group_id, created.sub_group_id);
    }

    #[tokio::test]
    async fn test_update_distinguishes_null_from_absent() {
        let catalog = service(SubGroupDeletePolicy::Detach).await;
        let (main, sub, group) = hierarchy(&catalog).await;

        let created = catalog
            .create_product(product_request("Trail Runner", &main, &sub, &group))
            .await
            .unwrap();
        assert!(created.description.is_some());

        // Absent description: untouched
        let body: UpdateProduct = serde_json::from_str(r#"{"price_cents": 9999}"#).unwrap();
        let updated = catalog.update_product(&created.id, body).await.unwrap();
        assert_eq!(updated.description, created.description);

        // Explicit null: cleared
        let body: UpdateProduct = serde_json::from_str(r#"{"description": null}"#).unwrap();
        let updated = catalog.update_product(&created.id, body).await.unwrap();
        assert_eq!(updated.description, None);
    }

    #[tokio::test]
    async fn test_subgroup_delete_policies() {
        // Detach: product survives, pointing at the missing subgroup
        let catalog = service(SubGroupDeletePolicy::Detach).await;
        let (main, sub, group) = hierarchy(&catalog).await;
        let p = catalog
            .create_product(product_request("Trail Runner", &main, &sub, &group))
            .await
            .unwrap();

        let deleted = catalog.delete_sub_group(&group).await.unwrap();
        assert_eq!(deleted.products_removed, 0);
        let survivor = catalog.get_product(&p.id).await.unwrap();
        assert_eq!(survivor.sub_group_id, group);

        // Restrict: refuses while referenced, then allows
        let catalog = service(SubGroupDeletePolicy::Restrict).await;
        let (main, sub, group) = hierarchy(&catalog).await;
        let p = catalog
            .create_product(product_request("Trail Runner", &main, &sub, &group))
            .await
            .unwrap();

        let err = catalog.delete_sub_group(&group).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));

        catalog.delete_product(&p.id).await.unwrap();
        catalog.delete_sub_group(&group).await.unwrap();

        // Cascade: products go with the subgroup
        let catalog = service(SubGroupDeletePolicy::Cascade).await;
        let (main, sub, group) = hierarchy(&catalog).await;
        catalog
            .create_product(product_request("Trail Runner", &main, &sub, &group))
            .await
            .unwrap();

        let deleted = catalog.delete_sub_group(&group).await.unwrap();
        assert_eq!(deleted.products_removed, 1);
        assert!(catalog.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_full_tree_shape() {
        let catalog = service(SubGroupDeletePolicy::Detach).await;
        let (_main, sub, _group) = hierarchy(&catalog).await;

        catalog
            .create_sub_group(CreateSubGroup {
                name: "Casual".to_string(),
                sub_category_id: sub.clone(),
            })
            .await
            .unwrap();
        catalog
            .create_category(CreateCategory {
                name: "Women".to_string(),
            })
            .await
            .unwrap();

        let tree = catalog.full_tree().await.unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].name, "Men");
        assert_eq!(tree[0].sub_categories.len(), 1);
        assert_eq!(tree[0].sub_categories[0].name, "Shoes");
        assert_eq!(tree[0].sub_categories[0].sub_groups.len(), 2);
        assert_eq!(tree[0].sub_categories[0].sub_groups[0].name, "Running");
        assert_eq!(tree[1].name, "Women");
        assert!(tree[1].sub_categories.is_empty());
    }

    #[tokio::test]
    async fn test_rename_category_checks_uniqueness_only_on_change() {
        let catalog = service(SubGroupDeletePolicy::Detach).await;

        let men = catalog
            .create_category(CreateCategory {
                name: "Men".to_string(),
            })
            .await
            .unwrap();
        catalog
            .create_category(CreateCategory {
                name: "Women".to_string(),
            })
            .await
            .unwrap();

        // Same name again: no conflict, it's not a change
        catalog
            .update_category(
                &men.id,
                UpdateCategory {
                    name: Some("Men".to_string()),
                },
            )
            .await
            .unwrap();

        // Renaming onto a taken name: conflict
        let err = catalog
            .update_category(
                &men.id,
                UpdateCategory {
                    name: Some("Women".to_string()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_cascade_delete_through_service() {
        let catalog = service(SubGroupDeletePolicy::Detach).await;
        let (main, _sub, _group) = hierarchy(&catalog).await;

        catalog.delete_category(&main).await.unwrap();

        assert!(catalog.list_categories().await.unwrap().is_empty());
        assert!(catalog.list_sub_categories().await.unwrap().is_empty());
        assert!(catalog.list_sub_groups().await.unwrap().is_empty());

        let err = catalog.delete_category(&main).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}

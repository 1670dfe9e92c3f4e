//! # Seed Data Generator
//!
//! Populates the database with a development admin account and a small
//! starter catalog.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p velora-db --bin seed
//!
//! # Specify database path
//! cargo run -p velora-db --bin seed -- --db ./data/velora.db
//!
//! # Override the admin credentials
//! ADMIN_EMAIL=ops@example.com ADMIN_PASSWORD=not-hunter2 cargo run -p velora-db --bin seed
//! ```
//!
//! Seeding is idempotent per run target: if any admin account already
//! exists the run aborts without touching the catalog.

use chrono::Utc;
use std::env;

use velora_core::password::hash_password;
use velora_core::{AdminUser, MainCategory, Product, SubCategory, SubGroup};
use velora_db::repository::generate_id;
use velora_db::{Database, DbConfig};

/// Starter catalog: (main category, subcategories, subgroups per subcategory)
const CATALOG: &[(&str, &[(&str, &[&str])])] = &[
    (
        "Men",
        &[
            ("Shoes", &["Running", "Casual", "Formal"]),
            ("Apparel", &["T-Shirts", "Jackets"]),
        ],
    ),
    (
        "Women",
        &[
            ("Shoes", &["Heels", "Sneakers"]),
            ("Accessories", &["Bags", "Belts"]),
        ],
    ),
    ("Kids", &[("Shoes", &["School", "Sports"])]),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = parse_db_arg().unwrap_or_else(|| "./velora.db".to_string());
    let admin_email =
        env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@velora.shop".to_string());
    let admin_password =
        env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "change-me-in-production".to_string());

    println!("Seeding database at {}", db_path);

    let db = Database::new(DbConfig::new(&db_path)).await?;

    if db.admins().count().await? > 0 {
        println!("Database already has admin accounts, nothing to do");
        return Ok(());
    }

    let now = Utc::now();

    // Admin account
    let admin = AdminUser {
        id: generate_id(),
        email: admin_email.clone(),
        password_hash: hash_password(&admin_password)?,
        created_at: now,
    };
    db.admins().insert(&admin).await?;
    println!("Created admin {}", admin_email);

    // Catalog hierarchy
    let mut sample_refs: Option<(String, String, String)> = None;

    for (main_name, sub_categories) in CATALOG {
        let main = MainCategory {
            id: generate_id(),
            name: (*main_name).to_string(),
            created_at: now,
            updated_at: now,
        };
        db.categories().insert(&main).await?;

        for (sub_name, groups) in *sub_categories {
            let sub = SubCategory {
                id: generate_id(),
                name: (*sub_name).to_string(),
                main_category_id: main.id.clone(),
                created_at: now,
                updated_at: now,
            };
            db.sub_categories().insert(&sub).await?;

            for group_name in *groups {
                let group = SubGroup {
                    id: generate_id(),
                    name: (*group_name).to_string(),
                    sub_category_id: sub.id.clone(),
                    created_at: now,
                    updated_at: now,
                };
                db.sub_groups().insert(&group).await?;

                if sample_refs.is_none() {
                    sample_refs = Some((main.id.clone(), sub.id.clone(), group.id.clone()));
                }
            }
        }
    }
    println!("Created starter catalog ({} main categories)", CATALOG.len());

    // A couple of products under the first subgroup so the storefront
    // isn't empty on first launch
    if let Some((main_id, sub_id, group_id)) = sample_refs {
        let samples: &[(&str, i64)] = &[
            ("Trail Runner Mk II", 12999),
            ("City Walker Low", 8950),
        ];

        for (title, price_cents) in samples {
            let product = Product {
                id: generate_id(),
                title: (*title).to_string(),
                description: Some(format!("{} - seeded development product", title)),
                price_cents: *price_cents,
                main_category_id: main_id.clone(),
                sub_category_id: sub_id.clone(),
                sub_group_id: group_id.clone(),
                colors: vec!["Black".to_string(), "White".to_string()],
                sizes: vec![7.0, 7.5, 8.0, 8.5, 9.0],
                assets: vec![format!(
                    "https://cdn.velora.shop/seed/{}.jpg",
                    title.to_lowercase().replace(' ', "-")
                )],
                created_at: now,
                updated_at: now,
            };
            db.products().insert(&product).await?;
        }
        println!("Created {} sample products", samples.len());
    }

    db.close().await;
    println!("Done");
    Ok(())
}

/// Parses `--db <path>` from the command line.
fn parse_db_arg() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|a| a == "--db")
        .and_then(|i| args.get(i + 1))
        .cloned()
}

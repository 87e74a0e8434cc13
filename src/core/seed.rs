//! Populates the catalog from seed data.
//!
//! Seeding is idempotent: categories, products and variants whose code or
//! SKU already exists are left as they are, so the same file can be applied
//! on every start.

use crate::{
    config::seed::SeedConfig,
    entities::{Category, Product, ProductVariant, category, product, product_variant},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use std::collections::HashMap;
use tracing::{info, instrument};

/// Counts of rows inserted by [`seed_catalog`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// New categories
    pub categories: usize,
    /// New products
    pub products: usize,
    /// New variants
    pub variants: usize,
}

/// Inserts every category, product and variant from `seed` that is not stored yet.
///
/// # Errors
/// Returns [`Error::Config`] if a product names a category code that is
/// neither in the seed nor in the database, or [`Error::Database`] if an
/// insert fails.
#[instrument(skip(db, seed))]
pub async fn seed_catalog(db: &DatabaseConnection, seed: &SeedConfig) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    for entry in &seed.categories {
        let exists = Category::find()
            .filter(category::Column::Code.eq(entry.code.as_str()))
            .one(db)
            .await?
            .is_some();
        if exists {
            continue;
        }
        category::ActiveModel {
            code: Set(entry.code.clone()),
            name: Set(entry.name.clone()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        summary.categories += 1;
    }

    let category_ids: HashMap<String, i64> = Category::find()
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.code, c.id))
        .collect();

    for entry in &seed.products {
        let category_id = *category_ids
            .get(&entry.category)
            .ok_or_else(|| Error::Config {
                message: format!(
                    "Product {} references unknown category {}",
                    entry.code, entry.category
                ),
            })?;

        let product = match Product::find()
            .filter(product::Column::Code.eq(entry.code.as_str()))
            .one(db)
            .await?
        {
            Some(existing) => existing,
            None => {
                summary.products += 1;
                product::ActiveModel {
                    code: Set(entry.code.clone()),
                    price: Set(entry.price),
                    category_id: Set(category_id),
                    ..Default::default()
                }
                .insert(db)
                .await?
            }
        };

        for variant in &entry.variants {
            let exists = ProductVariant::find()
                .filter(product_variant::Column::Sku.eq(variant.sku.as_str()))
                .one(db)
                .await?
                .is_some();
            if exists {
                continue;
            }
            product_variant::ActiveModel {
                product_id: Set(product.id),
                name: Set(variant.name.clone()),
                sku: Set(variant.sku.clone()),
                price: Set(variant.price),
                ..Default::default()
            }
            .insert(db)
            .await?;
            summary.variants += 1;
        }
    }

    info!(
        "Seeded {} categories, {} products, {} variants",
        summary.categories, summary.products, summary.variants
    );
    Ok(summary)
}

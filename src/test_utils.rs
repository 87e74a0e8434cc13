//! Shared test utilities for the catalog service.
//!
//! This module provides helpers for setting up in-memory test databases,
//! a canned sample catalog, and [`StubRepository`], a recording stand-in for
//! the real repository.

#![allow(clippy::unwrap_used)]

use crate::{
    config::seed::{SeedCategory, SeedConfig, SeedProduct, SeedVariant},
    core::{
        query::ProductQuery,
        repository::{ProductRecord, ProductRecordPage, ProductRepository},
        seed::seed_catalog,
    },
    entities::{category, product, product_variant},
    errors::Result,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::{Arc, Mutex};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

fn price(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn variant(sku: &str, name: &str, price: Option<Decimal>) -> SeedVariant {
    SeedVariant {
        sku: sku.to_string(),
        name: name.to_string(),
        price,
    }
}

/// The catalog used by database-backed tests.
///
/// | code    | category    | price  | variants                     |
/// |---------|-------------|--------|------------------------------|
/// | PROD001 | clothing    | 100.00 | V1 (unset), V2 (75.00)       |
/// | PROD002 | clothing    | 20.00  | V3 (0.00)                    |
/// | PROD003 | shoes       | 30.00  |                              |
/// | PROD004 | accessories | 60.00  |                              |
#[must_use]
pub fn sample_seed() -> SeedConfig {
    SeedConfig {
        categories: vec![
            SeedCategory {
                code: "clothing".to_string(),
                name: "Clothing".to_string(),
            },
            SeedCategory {
                code: "shoes".to_string(),
                name: "Shoes".to_string(),
            },
            SeedCategory {
                code: "accessories".to_string(),
                name: "Accessories".to_string(),
            },
        ],
        products: vec![
            SeedProduct {
                code: "PROD001".to_string(),
                price: price(10000),
                category: "clothing".to_string(),
                variants: vec![
                    variant("V1", "Variant One", None),
                    variant("V2", "Variant Two", Some(price(7500))),
                ],
            },
            SeedProduct {
                code: "PROD002".to_string(),
                price: price(2000),
                category: "clothing".to_string(),
                variants: vec![variant("V3", "Variant Three", Some(Decimal::ZERO))],
            },
            SeedProduct {
                code: "PROD003".to_string(),
                price: price(3000),
                category: "shoes".to_string(),
                variants: Vec::new(),
            },
            SeedProduct {
                code: "PROD004".to_string(),
                price: price(6000),
                category: "accessories".to_string(),
                variants: Vec::new(),
            },
        ],
    }
}

/// Sets up an in-memory database loaded with [`sample_seed`].
pub async fn setup_catalog_db() -> Result<DatabaseConnection> {
    let db = setup_test_db().await?;
    seed_catalog(&db, &sample_seed()).await?;
    Ok(db)
}

/// A stored product as the repository would return it, without touching a database.
///
/// PROD001 (100.00, clothing) with V1 unset, V2 at 75.00 and V3 at 0.00.
#[must_use]
pub fn sample_record() -> ProductRecord {
    let variant = |id: i64, sku: &str, name: &str, price: Option<Decimal>| product_variant::Model {
        id,
        product_id: 1,
        name: name.to_string(),
        sku: sku.to_string(),
        price,
    };

    ProductRecord {
        product: product::Model {
            id: 1,
            code: "PROD001".to_string(),
            price: price(10000),
            category_id: 1,
        },
        category: category::Model {
            id: 1,
            code: "clothing".to_string(),
            name: "Clothing".to_string(),
        },
        variants: vec![
            variant(1, "V1", "Variant One", None),
            variant(2, "V2", "Variant Two", Some(price(7500))),
            variant(3, "V3", "Variant Three", Some(Decimal::ZERO)),
        ],
    }
}

#[derive(Debug, Default)]
struct StubState {
    products: Vec<ProductRecord>,
    categories: Vec<category::Model>,
    failing: bool,
    calls: usize,
    last_query: Option<ProductQuery>,
}

/// In-memory [`ProductRepository`] that records how it was called.
///
/// Clones share state, so a test can hand one clone to the service and
/// inspect another.
#[derive(Clone, Debug, Default)]
pub struct StubRepository {
    state: Arc<Mutex<StubState>>,
}

impl StubRepository {
    /// A repository holding the given products.
    #[must_use]
    pub fn with_products(products: Vec<ProductRecord>) -> Self {
        let stub = Self::default();
        stub.state.lock().unwrap().products = products;
        stub
    }

    /// A repository whose every call fails like an unreachable database.
    #[must_use]
    pub fn failing() -> Self {
        let stub = Self::default();
        stub.state.lock().unwrap().failing = true;
        stub
    }

    /// Number of repository calls made so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }

    /// The query passed to the most recent `list_products` call.
    #[must_use]
    pub fn last_query(&self) -> Option<ProductQuery> {
        self.state.lock().unwrap().last_query.clone()
    }

    fn begin_call(&self) -> std::result::Result<std::sync::MutexGuard<'_, StubState>, DbErr> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        if state.failing {
            return Err(DbErr::Custom("connection refused".to_string()));
        }
        Ok(state)
    }
}

#[async_trait]
impl ProductRepository for StubRepository {
    async fn list_products(
        &self,
        query: &ProductQuery,
    ) -> std::result::Result<ProductRecordPage, DbErr> {
        let mut state = self.begin_call()?;
        state.last_query = Some(query.clone());

        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        Ok(ProductRecordPage {
            records: state
                .products
                .iter()
                .skip(offset)
                .take(limit)
                .cloned()
                .collect(),
            total: state.products.len() as u64,
        })
    }

    async fn find_product_by_code(
        &self,
        code: &str,
    ) -> std::result::Result<Option<ProductRecord>, DbErr> {
        let state = self.begin_call()?;
        Ok(state
            .products
            .iter()
            .find(|r| r.product.code == code)
            .cloned())
    }

    async fn list_categories(&self) -> std::result::Result<Vec<category::Model>, DbErr> {
        let state = self.begin_call()?;
        Ok(state.categories.clone())
    }

    async fn create_category(
        &self,
        code: &str,
        name: &str,
    ) -> std::result::Result<category::Model, DbErr> {
        let mut state = self.begin_call()?;
        let category = category::Model {
            id: state.categories.len() as i64 + 1,
            code: code.to_string(),
            name: name.to_string(),
        };
        state.categories.push(category.clone());
        Ok(category)
    }
}

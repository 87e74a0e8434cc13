//! Catalog business logic - Product lookup, listing and category management.
//!
//! [`CatalogService`] validates caller input before touching storage, runs
//! the repository call, applies price inheritance to every variant it reads
//! and translates storage failures into [`Error`] variants. It holds no state
//! besides the repository handle, so calls are independent of each other.

use crate::{
    core::{
        pricing::{resolve_effective_price, to_fixed_point},
        query::ProductQuery,
        repository::{ProductRecord, ProductRepository},
    },
    entities::category,
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{DbErr, SqlErr};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// A variant as clients see it, priced with its effective price.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogVariant {
    /// Display name
    pub name: String,
    /// Stock keeping unit
    pub sku: String,
    /// Effective price (own override or inherited base price)
    pub price: Decimal,
}

/// A product with its category and resolved variants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogProduct {
    /// Product code
    pub code: String,
    /// Base price
    pub price: Decimal,
    /// The category the product is filed under
    pub category: category::Model,
    /// Variants in a stable order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<CatalogVariant>,
}

/// A page of products and the number of matches across all pages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProductPage {
    /// Products on this page
    pub products: Vec<CatalogProduct>,
    /// Total matching products before pagination
    pub total: u64,
}

/// Request to create a category.
///
/// Missing fields deserialize as empty strings so they are reported by
/// validation rather than by the JSON decoder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct NewCategory {
    /// Unique category code
    #[serde(default)]
    pub code: String,
    /// Display name
    #[serde(default)]
    pub name: String,
}

impl From<ProductRecord> for CatalogProduct {
    /// Applies price inheritance to every variant of a freshly loaded product.
    fn from(record: ProductRecord) -> Self {
        let base_price = record.product.price;
        let variants = record
            .variants
            .into_iter()
            .map(|variant| CatalogVariant {
                price: to_fixed_point(resolve_effective_price(base_price, variant.price)),
                name: variant.name,
                sku: variant.sku,
            })
            .collect();

        Self {
            code: record.product.code,
            price: to_fixed_point(base_price),
            category: record.category,
            variants,
        }
    }
}

/// Entry point for every catalog operation.
#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn ProductRepository>,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService").finish_non_exhaustive()
    }
}

impl CatalogService {
    /// Creates a service on top of the given repository.
    #[must_use]
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// Lists one page of products matching the query, with the total match count.
    ///
    /// # Errors
    /// Returns [`Error::Database`] if the storage layer fails; no partial page
    /// is ever returned.
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: &ProductQuery) -> Result<ProductPage> {
        let page = self
            .repository
            .list_products(query)
            .await
            .map_err(storage_error)?;

        debug!(
            "Listing {} products out of {} matches",
            page.records.len(),
            page.total
        );

        Ok(ProductPage {
            products: page.records.into_iter().map(CatalogProduct::from).collect(),
            total: page.total,
        })
    }

    /// Looks up a single product by its code.
    ///
    /// # Errors
    /// - [`Error::Validation`] if `code` is blank (storage is not queried)
    /// - [`Error::ProductNotFound`] if no product has this code
    /// - [`Error::Database`] if the storage layer fails
    #[instrument(skip(self))]
    pub async fn get_product_by_code(&self, code: &str) -> Result<CatalogProduct> {
        if code.trim().is_empty() {
            return Err(Error::Validation {
                message: "Product code is required".to_string(),
            });
        }

        self.repository
            .find_product_by_code(code)
            .await
            .map_err(storage_error)?
            .map(CatalogProduct::from)
            .ok_or_else(|| Error::ProductNotFound {
                code: code.to_string(),
            })
    }

    /// Returns every category.
    ///
    /// # Errors
    /// Returns [`Error::Database`] if the storage layer fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<category::Model>> {
        self.repository
            .list_categories()
            .await
            .map_err(storage_error)
    }

    /// Creates a category from trimmed, non-empty `code` and `name`.
    ///
    /// # Errors
    /// - [`Error::Validation`] if either field is blank (storage is not queried)
    /// - [`Error::CategoryConflict`] if the code is already taken
    /// - [`Error::Database`] for any other storage failure
    #[instrument(skip(self))]
    pub async fn create_category(&self, request: &NewCategory) -> Result<category::Model> {
        let code = request.code.trim();
        let name = request.name.trim();

        if code.is_empty() || name.is_empty() {
            return Err(Error::Validation {
                message: "Category code and name are required".to_string(),
            });
        }

        match self.repository.create_category(code, name).await {
            Ok(category) => {
                info!("Created category {}", category.code);
                Ok(category)
            }
            Err(e) if is_unique_violation(&e) => {
                warn!("Category code {} is already taken", code);
                Err(Error::CategoryConflict {
                    code: code.to_string(),
                })
            }
            Err(e) => Err(storage_error(e)),
        }
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn storage_error(err: DbErr) -> Error {
    error!("Storage failure: {}", err);
    Error::Database(err)
}

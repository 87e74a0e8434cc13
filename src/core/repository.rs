//! Storage access for the catalog.
//!
//! [`ProductRepository`] is the seam between the catalog service and the
//! database. [`SeaOrmProductRepository`] is the production implementation;
//! tests substitute a double (see `test_utils::StubRepository`).
//!
//! Repositories return raw rows: variant prices are exactly what is stored,
//! and errors are plain [`DbErr`]s. Interpreting either is the service's job.

use crate::{
    core::query::ProductQuery,
    entities::{Category, Product, ProductVariant, category, product, product_variant},
};
use async_trait::async_trait;
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, IsolationLevel,
    LoaderTrait, PaginatorTrait, QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*,
};
use tracing::{debug, instrument};

/// A product row together with the rows it owns or references, as stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductRecord {
    /// The product itself
    pub product: product::Model,
    /// The category referenced by `product.category_id`
    pub category: category::Model,
    /// Variants in insertion order, with raw stored prices
    pub variants: Vec<product_variant::Model>,
}

/// One page of matching products plus the number of matches across all pages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductRecordPage {
    /// Products on the requested page
    pub records: Vec<ProductRecord>,
    /// Count of all matching products before pagination
    pub total: u64,
}

/// Data access contract used by [`crate::core::catalog::CatalogService`].
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Returns the requested page of products matching `query` and the total match count.
    async fn list_products(&self, query: &ProductQuery) -> Result<ProductRecordPage, DbErr>;

    /// Finds the product with the given code, if any.
    async fn find_product_by_code(&self, code: &str) -> Result<Option<ProductRecord>, DbErr>;

    /// Returns every category.
    async fn list_categories(&self) -> Result<Vec<category::Model>, DbErr>;

    /// Inserts a category and returns it with its assigned id.
    async fn create_category(&self, code: &str, name: &str) -> Result<category::Model, DbErr>;
}

/// [`ProductRepository`] backed by a SeaORM connection pool.
#[derive(Debug)]
pub struct SeaOrmProductRepository {
    db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    /// Wraps an established database connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gives the connection back, e.g. to inspect a mock's transaction log.
    #[cfg(test)]
    pub(crate) fn into_connection(self) -> DatabaseConnection {
        self.db
    }
}

/// Transaction settings for reading a count and a page from one snapshot.
///
/// Postgres defaults to READ COMMITTED, where every statement sees a fresh
/// snapshot, so the listing asks for REPEATABLE READ. SQLite transactions are
/// already serializable and ignore per-transaction settings.
const fn snapshot_read_config(
    backend: DatabaseBackend,
) -> (Option<IsolationLevel>, Option<AccessMode>) {
    match backend {
        DatabaseBackend::Postgres | DatabaseBackend::MySql => (
            Some(IsolationLevel::RepeatableRead),
            Some(AccessMode::ReadOnly),
        ),
        DatabaseBackend::Sqlite => (None, None),
    }
}

/// Attaches categories and variants to already-fetched products.
///
/// Two batched queries are issued regardless of how many products are given.
async fn attach_relations<C>(
    db: &C,
    products: Vec<product::Model>,
) -> Result<Vec<ProductRecord>, DbErr>
where
    C: ConnectionTrait + Sync,
{
    if products.is_empty() {
        return Ok(Vec::new());
    }

    let categories = products.load_one(Category, db).await?;
    let variants = products
        .load_many(
            ProductVariant::find().order_by_asc(product_variant::Column::Id),
            db,
        )
        .await?;

    products
        .into_iter()
        .zip(categories)
        .zip(variants)
        .map(|((product, category), variants)| {
            let category = category.ok_or_else(|| {
                DbErr::RecordNotFound(format!(
                    "category {} referenced by product {}",
                    product.category_id, product.code
                ))
            })?;
            Ok(ProductRecord {
                product,
                category,
                variants,
            })
        })
        .collect()
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    #[instrument(skip(self))]
    async fn list_products(&self, query: &ProductQuery) -> Result<ProductRecordPage, DbErr> {
        // Count and page are read from one snapshot so they describe the same rows
        let (isolation, access) = snapshot_read_config(self.db.get_database_backend());
        let txn = self.db.begin_with_config(isolation, access).await?;

        let select = query.matching_products();
        let total = select.clone().count(&txn).await?;
        let products = select
            .offset(query.offset)
            .limit(query.limit)
            .all(&txn)
            .await?;
        let records = attach_relations(&txn, products).await?;

        txn.commit().await?;

        debug!("Fetched {} of {} matching products", records.len(), total);
        Ok(ProductRecordPage { records, total })
    }

    #[instrument(skip(self))]
    async fn find_product_by_code(&self, code: &str) -> Result<Option<ProductRecord>, DbErr> {
        let Some(product) = Product::find()
            .filter(product::Column::Code.eq(code))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        Ok(attach_relations(&self.db, vec![product]).await?.pop())
    }

    #[instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<category::Model>, DbErr> {
        Category::find()
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await
    }

    #[instrument(skip(self))]
    async fn create_category(&self, code: &str, name: &str) -> Result<category::Model, DbErr> {
        let category = category::ActiveModel {
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            ..Default::default()
        };
        category.insert(&self.db).await
    }
}

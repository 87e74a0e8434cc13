//! Core business logic - framework-agnostic catalog operations.
//!
//! Nothing in here knows about HTTP. The API layer calls into
//! [`catalog::CatalogService`], which in turn talks to storage through the
//! [`repository::ProductRepository`] trait.

/// Catalog service: validation, price resolution and error translation
pub mod catalog;
/// Variant price inheritance
pub mod pricing;
/// Listing parameter normalization and select construction
pub mod query;
/// Storage contract and its `SeaORM` implementation
pub mod repository;
/// Idempotent catalog seeding
pub mod seed;

pub use catalog::{CatalogProduct, CatalogService, CatalogVariant, NewCategory, ProductPage};
pub use query::ProductQuery;
pub use repository::{ProductRepository, SeaOrmProductRepository};

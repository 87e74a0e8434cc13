//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the catalog tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod category;
pub mod product;
pub mod product_variant;

// Re-export specific types to avoid conflicts
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use product_variant::{
    Column as ProductVariantColumn, Entity as ProductVariant, Model as ProductVariantModel,
};

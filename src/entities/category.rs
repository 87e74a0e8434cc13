//! Category entity - Groups products under a stable, human-readable code.
//!
//! The `code` is the external identifier; `id` only exists for relational
//! linkage and is never serialized.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Internal identifier used by `products.category_id`
    #[sea_orm(primary_key)]
    #[serde(skip)]
    pub id: i64,
    /// Unique code (e.g., `"clothing"`)
    #[sea_orm(unique)]
    pub code: String,
    /// Display name (e.g., `"Clothing"`)
    pub name: String,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One category is shared by many products
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

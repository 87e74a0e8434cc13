//! Product entity - A sellable item with a base price.
//!
//! Each product belongs to exactly one category and owns zero or more variants.
//! Variants without their own price inherit `price` at read time (see
//! [`crate::core::pricing`]).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Internal identifier, also the stable listing order
    #[sea_orm(primary_key)]
    #[serde(skip)]
    pub id: i64,
    /// Unique product code (e.g., `"PROD001"`)
    #[sea_orm(unique)]
    pub code: String,
    /// Base price, fixed-point with two decimal places
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    /// Category this product is filed under
    #[serde(skip)]
    pub category_id: i64,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    /// One product has many variants
    #[sea_orm(has_many = "super::product_variant::Entity")]
    Variants,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::product_variant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Variants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Product variant entity - A concrete SKU of a product.
//!
//! `price` is the raw stored override. `None` (or zero) means the variant
//! has no price of its own.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product variant database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_variants")]
pub struct Model {
    /// Internal identifier
    #[sea_orm(primary_key)]
    #[serde(skip)]
    pub id: i64,
    /// Owning product
    #[serde(skip)]
    pub product_id: i64,
    /// Display name (e.g., `"Size M"`)
    pub name: String,
    /// Unique stock keeping unit
    #[sea_orm(unique)]
    pub sku: String,
    /// Raw stored price override
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub price: Option<Decimal>,
}

/// Defines relationships between ProductVariant and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each variant belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Database connection and table creation.
//!
//! Connections are opened with `SeaORM`'s [`Database::connect`], so any URL it
//! understands works (`sqlite://...`, `postgres://...`). Tables are generated
//! from the entity definitions with `Schema::create_table_from_entity`, which
//! keeps the unique and foreign key constraints in one place: the entities.

use crate::entities::{Category, Product, ProductVariant};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info, instrument};

/// Establishes a connection pool for the given database URL.
#[instrument(skip(database_url))]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database");
    let db = Database::connect(database_url).await?;
    info!("Database connection established");
    Ok(db)
}

/// Creates the catalog tables if they do not exist yet.
///
/// Tables are created parent-first so foreign keys always reference an
/// existing table: categories, then products, then product variants.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut category_table = schema.create_table_from_entity(Category);
    let mut product_table = schema.create_table_from_entity(Product);
    let mut variant_table = schema.create_table_from_entity(ProductVariant);

    for table in [&mut category_table, &mut product_table, &mut variant_table] {
        table.if_not_exists();
        db.execute(builder.build(&*table)).await?;
    }

    debug!("Catalog tables ensured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        category::Model as CategoryModel, product::Model as ProductModel,
        product_variant::Model as ProductVariantModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<CategoryModel> = Category::find().limit(1).all(&db).await?;
        let _: Vec<ProductModel> = Product::find().limit(1).all(&db).await?;
        let _: Vec<ProductVariantModel> = ProductVariant::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}

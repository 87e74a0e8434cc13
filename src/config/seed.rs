//! Catalog seed data loading from a TOML file
//!
//! Products are never created through the HTTP interface, so a fresh database
//! is populated from a seed file instead. The file lists categories and
//! products, each product naming its category by code and optionally listing
//! its variants:
//!
//! ```toml
//! [[categories]]
//! code = "clothing"
//! name = "Clothing"
//!
//! [[products]]
//! code = "PROD001"
//! price = "100.00"
//! category = "clothing"
//!
//! [[products.variants]]
//! sku = "V1"
//! name = "Variant One"
//! ```

use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire seed file
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct SeedConfig {
    /// Categories to create
    #[serde(default)]
    pub categories: Vec<SeedCategory>,
    /// Products to create, with their variants
    #[serde(default)]
    pub products: Vec<SeedProduct>,
}

/// Seed entry for a single category
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SeedCategory {
    /// Unique category code
    pub code: String,
    /// Display name
    pub name: String,
}

/// Seed entry for a single product
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SeedProduct {
    /// Unique product code
    pub code: String,
    /// Base price
    pub price: Decimal,
    /// Code of the category the product belongs to
    pub category: String,
    /// Variants of this product
    #[serde(default)]
    pub variants: Vec<SeedVariant>,
}

/// Seed entry for a single variant
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SeedVariant {
    /// Unique stock keeping unit
    pub sku: String,
    /// Display name
    pub name: String,
    /// Price override; omit to inherit the product price
    #[serde(default)]
    pub price: Option<Decimal>,
}

/// Loads catalog seed data from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_seed<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let path = path.as_ref();
    tracing::debug!("Loading catalog seed from {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read seed file {}: {e}", path.display()),
    })?;

    parse_seed(&contents)
}

/// Parses catalog seed data from TOML text
pub fn parse_seed(contents: &str) -> Result<SeedConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse seed file: {e}"),
    })
}

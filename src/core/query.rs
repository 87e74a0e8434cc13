//! Paginated, filtered product listing.
//!
//! Raw request parameters are coerced into a [`ProductQuery`] (malformed input
//! falls back to defaults instead of being rejected), and the query is turned
//! into a SeaORM [`Select`] that the repository executes twice: once to count
//! every match and once to fetch the requested page.

use crate::entities::{Category, Product, category, product};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Select, prelude::*};
use std::num::IntErrorKind;
use std::str::FromStr;

/// Page size used when none (or an invalid one) is requested.
pub const DEFAULT_LIMIT: u64 = 10;
/// Largest page size a caller can ask for.
pub const MAX_LIMIT: u64 = 100;

/// Normalized listing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    /// Page size, always in `1..=MAX_LIMIT`
    pub limit: u64,
    /// Number of matching rows to skip
    pub offset: u64,
    /// Exact, case-sensitive category code to filter on
    pub category: Option<String>,
    /// Exclusive upper bound on the product base price
    pub max_price: Option<Decimal>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            category: None,
            max_price: None,
        }
    }
}

impl ProductQuery {
    /// Builds a query from raw string parameters as they arrive over HTTP.
    ///
    /// Nothing here fails: unparseable or out-of-range values fall back to
    /// their defaults (`limit` 10, `offset` 0, no filters) and an oversized
    /// `limit` is clamped to [`MAX_LIMIT`].
    #[must_use]
    pub fn from_params(
        limit: Option<&str>,
        offset: Option<&str>,
        category: Option<&str>,
        price_less_than: Option<&str>,
    ) -> Self {
        Self {
            limit: normalize_limit(limit),
            offset: normalize_offset(offset),
            category: category.filter(|c| !c.is_empty()).map(str::to_string),
            max_price: price_less_than.and_then(parse_max_price),
        }
    }

    /// Builds the select for every product matching the filters, in a stable order.
    ///
    /// Pagination is not applied here so the same statement can be counted.
    #[must_use]
    pub fn matching_products(&self) -> Select<Product> {
        let mut select = Product::find();

        if let Some(code) = &self.category {
            select = select
                .inner_join(Category)
                .filter(category::Column::Code.eq(code.as_str()));
        }

        if let Some(max_price) = self.max_price {
            select = select.filter(product::Column::Price.lt(max_price));
        }

        select.order_by_asc(product::Column::Id)
    }
}

fn normalize_limit(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return DEFAULT_LIMIT;
    };
    match raw.parse::<i64>() {
        Ok(limit) if limit <= 0 => DEFAULT_LIMIT,
        Ok(limit) => u64::try_from(limit).map_or(DEFAULT_LIMIT, |l| l.min(MAX_LIMIT)),
        // A positive integer too large for i64 is still "greater than 100"
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => MAX_LIMIT,
        Err(_) => DEFAULT_LIMIT,
    }
}

fn normalize_offset(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return 0;
    };
    match raw.parse::<i64>() {
        Ok(offset) => u64::try_from(offset).unwrap_or(0),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => i64::MAX.unsigned_abs(),
        Err(_) => 0,
    }
}

fn parse_max_price(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    let price = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()?;
    (price > Decimal::ZERO).then_some(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn test_limit_defaults_and_clamps() {
        let limit = |raw| ProductQuery::from_params(raw, None, None, None).limit;

        assert_eq!(limit(None), 10);
        assert_eq!(limit(Some("")), 10);
        assert_eq!(limit(Some("0")), 10);
        assert_eq!(limit(Some("-3")), 10);
        assert_eq!(limit(Some("abc")), 10);
        assert_eq!(limit(Some("2.5")), 10);
        assert_eq!(limit(Some("1")), 1);
        assert_eq!(limit(Some("25")), 25);
        assert_eq!(limit(Some("100")), 100);
        assert_eq!(limit(Some("101")), 100);
        assert_eq!(limit(Some("99999999999999999999999")), 100);
    }

    #[test]
    fn test_offset_defaults() {
        let offset = |raw| ProductQuery::from_params(None, raw, None, None).offset;

        assert_eq!(offset(None), 0);
        assert_eq!(offset(Some("-5")), 0);
        assert_eq!(offset(Some("nope")), 0);
        assert_eq!(offset(Some("0")), 0);
        assert_eq!(offset(Some("30")), 30);
    }

    #[test]
    fn test_filters_are_optional() {
        let query = ProductQuery::from_params(Some("0"), Some("-5"), Some(""), Some("0"));
        assert_eq!(query, ProductQuery::default());

        let query = ProductQuery::from_params(None, None, None, Some("-12.5"));
        assert_eq!(query.max_price, None);

        let query = ProductQuery::from_params(None, None, None, Some("cheap"));
        assert_eq!(query.max_price, None);
    }

    #[test]
    fn test_filters_are_parsed() {
        let query = ProductQuery::from_params(None, None, Some("clothing"), Some("50.0"));
        assert_eq!(query.category.as_deref(), Some("clothing"));
        assert_eq!(query.max_price, Some(Decimal::new(50, 0)));

        let query = ProductQuery::from_params(None, None, Some("Clothing"), Some("5e1"));
        assert_eq!(query.category.as_deref(), Some("Clothing"));
        assert_eq!(query.max_price, Some(Decimal::new(50, 0)));
    }

    #[test]
    fn test_unfiltered_select_has_no_join() {
        let sql = ProductQuery::default()
            .matching_products()
            .build(DbBackend::Postgres)
            .to_string();

        assert!(!sql.contains("JOIN"));
        assert!(!sql.contains("WHERE"));
        assert!(sql.contains(r#"ORDER BY "products"."id" ASC"#));
    }

    #[test]
    fn test_filtered_select_joins_categories() {
        let query = ProductQuery::from_params(None, None, Some("clothing"), Some("50"));
        let sql = query.matching_products().build(DbBackend::Postgres).to_string();

        assert!(sql.contains(r#"INNER JOIN "categories""#));
        assert!(sql.contains(r#""categories"."code" = 'clothing'"#));
        assert!(sql.contains(r#""products"."price" <"#));
        assert!(!sql.contains("LIMIT"));
    }
}

//! Price inheritance for product variants.
//!
//! A variant may carry its own price or fall back to the base price of the
//! product it belongs to. The rule is applied by [`crate::core::catalog`]
//! after every read; nothing here touches storage.

use rust_decimal::Decimal;

/// Number of decimal places prices are presented with.
pub const PRICE_SCALE: u32 = 2;

/// Returns the price a client observes for a variant.
///
/// An absent or zero raw price means "no override", so the product's base
/// price is used. A variant that is genuinely meant to be free cannot be
/// expressed with this rule.
#[must_use]
pub fn resolve_effective_price(base_price: Decimal, raw_variant_price: Option<Decimal>) -> Decimal {
    match raw_variant_price {
        Some(price) if !price.is_zero() => price,
        _ => base_price,
    }
}

/// Rescales a price to the fixed two-decimal presentation (`100` -> `100.00`).
#[must_use]
pub fn to_fixed_point(mut price: Decimal) -> Decimal {
    price.rescale(PRICE_SCALE);
    price
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    #[test]
    fn test_absent_price_inherits_base() {
        assert_eq!(resolve_effective_price(dec(10000), None), dec(10000));
    }

    #[test]
    fn test_zero_price_inherits_base() {
        assert_eq!(resolve_effective_price(dec(10000), Some(Decimal::ZERO)), dec(10000));
        // Zero with a different scale is still zero
        assert_eq!(resolve_effective_price(dec(4999), Some(dec(0))), dec(4999));
    }

    #[test]
    fn test_override_is_used_regardless_of_base() {
        assert_eq!(resolve_effective_price(dec(10000), Some(dec(7500))), dec(7500));
        assert_eq!(resolve_effective_price(dec(1000), Some(dec(7500))), dec(7500));
        assert_eq!(resolve_effective_price(Decimal::ZERO, Some(dec(1))), dec(1));
    }

    #[test]
    fn test_to_fixed_point() {
        assert_eq!(to_fixed_point(Decimal::from(100)).to_string(), "100.00");
        assert_eq!(to_fixed_point(dec(7550)).to_string(), "75.50");
        assert_eq!(to_fixed_point(Decimal::new(123_456, 4)).to_string(), "12.35");
    }
}

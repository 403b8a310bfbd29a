//! Shared pricing rules for cart lines, mirror entries and checkout.
//!
//! A product's unit price is its explicit price when one is set and non-zero,
//! otherwise the sum of its kit prices. A product with neither prices at zero.
//! The derivation is recomputed on every call and never cached.

use crate::domain::foundation::{Money, Quantity};

use super::Kit;

/// Derives the unit price of a product reference.
pub fn derive_unit_price(explicit_price: Option<Money>, kits: &[Kit]) -> Money {
    match explicit_price {
        Some(price) if !price.is_zero() => price,
        _ => kits.iter().map(|kit| kit.kit_price).sum(),
    }
}

/// Price of a line: unit price times quantity.
pub fn line_total(unit_price: Money, quantity: Quantity) -> Money {
    unit_price.times(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn kit(price: &str) -> Kit {
        Kit {
            kit_name: "Kit".into(),
            kit_description: "Parts".into(),
            kit_price: Money::new(Decimal::from_str(price).unwrap()).unwrap(),
        }
    }

    #[test]
    fn explicit_price_wins() {
        let price = derive_unit_price(Some(Money::from_units(99)), &[kit("10")]);
        assert_eq!(price, Money::from_units(99));
    }

    #[test]
    fn zero_explicit_price_falls_back_to_kits() {
        let price = derive_unit_price(Some(Money::ZERO), &[kit("10"), kit("2.5")]);
        assert_eq!(price.amount(), Decimal::from_str("12.5").unwrap());
    }

    #[test]
    fn no_kits_and_no_price_is_zero() {
        assert!(derive_unit_price(None, &[]).is_zero());
    }

    #[test]
    fn line_total_multiplies() {
        let total = line_total(Money::from_units(7), Quantity::new(3).unwrap());
        assert_eq!(total, Money::from_units(21));
    }
}

//! Assort pricing
//!
//! Market price, else handbook price, else 1; times the multiplier;
//! rounded to the nearest whole rouble.

use crate::host::PriceReader;

/// Handbook fallback when an item has no price anywhere
pub const FALLBACK_PRICE: f64 = 1.0;

/// Sale price of one item. A market price of 0 counts as missing and falls
/// through to the handbook.
pub fn assort_price<P: PriceReader + ?Sized>(item_id: &str, prices: &P, multiplier: f64) -> u64 {
    let market = prices
        .market_price(item_id)
        .filter(|price| *price != 0.0 && !price.is_nan());

    let base = market.unwrap_or_else(|| prices.handbook_price(item_id).unwrap_or(FALLBACK_PRICE));
    round_price(base * multiplier)
}

/// Round half away from zero, never below 0
fn round_price(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    value.round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Templates;

    fn templates() -> Templates {
        let mut templates = Templates::default();
        templates.prices.insert("A", 100.0);
        templates.prices.insert("B", 0.0);
        templates.handbook.push("A", 70.0);
        templates.handbook.push("B", 50.0);
        templates
    }

    #[test]
    fn test_market_handbook_and_default() {
        let templates = templates();
        assert_eq!(assort_price("A", &templates, 2.0), 200);
        assert_eq!(assort_price("B", &templates, 2.0), 100);
        assert_eq!(assort_price("C", &templates, 2.0), 2);
    }

    #[test]
    fn test_market_price_wins_over_handbook() {
        let templates = templates();
        assert_eq!(assort_price("A", &templates, 1.0), 100);
    }

    #[test]
    fn test_rounding() {
        let mut templates = Templates::default();
        templates.prices.insert("half", 10.5);
        templates.prices.insert("low", 10.49);
        assert_eq!(assort_price("half", &templates, 1.0), 11);
        assert_eq!(assort_price("low", &templates, 1.0), 10);
        assert_eq!(assort_price("low", &templates, 1.5), 16);
    }

    #[test]
    fn test_market_price_times_multiplier() {
        let mut templates = Templates::default();
        for (i, price) in [1.0, 33.3, 250.0, 12345.6].iter().enumerate() {
            templates.prices.insert(&format!("id{}", i), *price);
        }
        for (i, price) in [1.0, 33.3, 250.0, 12345.6].iter().enumerate() {
            for multiplier in [0.5, 1.0, 1.25, 3.0] {
                assert_eq!(
                    assort_price(&format!("id{}", i), &templates, multiplier),
                    (price * multiplier).round() as u64
                );
            }
        }
    }

    #[test]
    fn test_non_positive_results_clamp_to_zero() {
        let templates = templates();
        assert_eq!(assort_price("A", &templates, 0.0), 0);
        assert_eq!(assort_price("A", &templates, -1.0), 0);
    }
}

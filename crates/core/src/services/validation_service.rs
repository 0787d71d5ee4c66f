//! Field predicates for transaction rows.
//!
//! Pure functions, run on every field change so rows can show live validity.

use crate::models::coin::CoinRef;

/// Parse `text` as a strictly positive, finite decimal.
///
/// Surrounding whitespace is ignored. Empty text, zero, negatives,
/// non-numeric text and values that overflow to infinity all yield `None`,
/// as do the literal spellings `inf` and `NaN` that `f64` would otherwise accept.
pub fn parse_positive_decimal(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value: f64 = trimmed.parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// A coin is valid once any part of its identity has been selected.
pub fn is_coin_valid(coin: &CoinRef) -> bool {
    coin.is_selected()
}

pub fn is_units_valid(text: &str) -> bool {
    parse_positive_decimal(text).is_some()
}

pub fn is_initial_price_valid(text: &str) -> bool {
    parse_positive_decimal(text).is_some()
}

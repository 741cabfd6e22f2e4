//! Money conversion between major units (API, `f64`) and integer minor units
//! (storage, paise).
//!
//! Conversion goes through `Decimal` and rounds exactly once, half away
//! from zero. Arithmetic on stored amounts stays in `i64`.

use rust_decimal::prelude::*;

/// Minor units per major unit (paise per rupee)
const MINOR_SCALE: u32 = 2;

/// Convert f64 to Decimal for calculation
///
/// Non-finite input maps to zero.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite or out-of-range f64 in monetary conversion, defaulting to zero");
        Decimal::ZERO
    })
}

/// Major units → minor units, rounded half away from zero.
///
/// Values that do not fit in `i64` minor units map to zero.
pub fn major_to_minor(major: f64) -> i64 {
    let scaled = to_decimal(major).checked_mul(Decimal::ONE_HUNDRED);
    scaled
        .map(|d| d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_i64())
        .unwrap_or_else(|| {
            tracing::error!(value = ?major, "Amount out of range, defaulting to zero");
            0
        })
}

/// Minor units → major units, for output only.
pub fn minor_to_major(minor: i64) -> f64 {
    Decimal::new(minor, MINOR_SCALE).to_f64().unwrap_or(0.0)
}

/// Parse a user-entered major-unit amount ("1500", "1,500.50", " 12.5 ").
///
/// Returns `None` for empty or unparsable text and non-finite values.
pub fn parse_major(text: &str) -> Option<i64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    let value = Decimal::from_str(&cleaned).ok()?;
    value
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

//! Money helpers built on decimal arithmetic.
//!
//! Prices travel as decimal strings (`"150.00"`) from the backend and are
//! accepted as plain JSON numbers from older persisted carts; both decode to
//! [`Decimal`] without loss.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Amount of spend that earns one loyalty point.
pub const POINTS_SPEND_UNIT: Decimal = Decimal::ONE_HUNDRED;

/// Currency sign shown next to every amount.
pub const CURRENCY_SIGN: &str = "₽";

/// Loyalty points earned for an order total: `floor(total / 100)`.
///
/// Negative totals earn nothing.
///
/// ```
/// use rust_decimal::Decimal;
/// use teezy_core::points_for_total;
///
/// assert_eq!(points_for_total(Decimal::new(300, 0)), 3);
/// assert_eq!(points_for_total(Decimal::new(19999, 2)), 1);
/// ```
#[must_use]
pub fn points_for_total(total: Decimal) -> u64 {
    (total / POINTS_SPEND_UNIT).floor().to_u64().unwrap_or(0)
}

/// Format an amount with two decimal places and the currency sign.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2} {CURRENCY_SIGN}", amount.round_dp(2))
}

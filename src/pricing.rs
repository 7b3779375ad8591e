//! Pricing
//!
//! Amounts cross the cart boundary as decimal strings and are handled
//! internally as whole minor units.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Minor units in one major unit for every supported currency.
const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Decimal places used when formatting amounts for output.
const OUTPUT_DECIMAL_PLACES: u32 = 2;

/// Errors that can occur while parsing a decimal amount.
#[derive(Debug, Error, PartialEq)]
pub enum AmountError {
    /// The string is not a decimal number.
    #[error("invalid amount: {0:?}")]
    Invalid(String),

    /// The amount is below zero.
    #[error("negative amount: {0:?}")]
    Negative(String),

    /// The amount cannot be represented in minor units.
    #[error("amount out of range: {0:?}")]
    OutOfRange(String),
}

/// Parse a decimal amount string (e.g. `"179.90"`) into minor units.
///
/// Fractions of a minor unit are rounded half away from zero.
///
/// # Errors
///
/// - [`AmountError::Invalid`]: the string is not a decimal number.
/// - [`AmountError::Negative`]: the amount is below zero.
/// - [`AmountError::OutOfRange`]: the amount overflows minor units.
pub fn parse_minor_units(amount: &str) -> Result<i64, AmountError> {
    let value = amount
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| AmountError::Invalid(amount.to_string()))?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(AmountError::Negative(amount.to_string()));
    }

    value
        .checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))
        .map(|minor| minor.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|minor| minor.to_i64())
        .ok_or_else(|| AmountError::OutOfRange(amount.to_string()))
}

/// Parse a decimal amount string into money of the given currency.
///
/// # Errors
///
/// Returns an [`AmountError`] if the amount cannot be parsed; see
/// [`parse_minor_units`].
pub fn parse_amount<'a>(
    amount: &str,
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, AmountError> {
    Ok(Money::from_minor(parse_minor_units(amount)?, currency))
}

/// Sum a list of prices in minor units, saturating rather than overflowing.
pub fn total_minor_units(prices: &[Money<'_, Currency>]) -> i64 {
    prices
        .iter()
        .map(Money::to_minor_units)
        .fold(0, i64::saturating_add)
}

/// Format money as a plain decimal string with exactly two places (e.g. `"270.10"`).
pub fn format_amount(money: &Money<'_, Currency>) -> String {
    Decimal::new(money.to_minor_units(), OUTPUT_DECIMAL_PLACES).to_string()
}

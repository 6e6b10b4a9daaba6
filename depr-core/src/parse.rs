//! Parsing and formatting at the host boundary.
//!
//! Currency amounts cross the boundary as plain 2-decimal strings
//! (e.g. `"1234.50"`); the engine owns both directions of the conversion so
//! the host never parses financial strings itself. Malformed input is
//! absorbed to zero, never surfaced (logged at `warn` level).

use rust_decimal::Decimal;
use tracing::warn;

use crate::schedule::common::round_to_cents;

/// Keeps ASCII digits, `.` and `-`; drops everything else (currency symbols,
/// thousands separators, whitespace).
fn strip_non_numeric(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

/// Parses a currency string into a [`Decimal`]. Never fails.
///
/// Empty, symbol-only, or otherwise unparseable input yields zero.
///
/// # Examples
///
/// ```
/// use depr_core::parse::parse_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_currency("1,234.50"), dec!(1234.50));
/// assert_eq!(parse_currency("$500"), dec!(500));
/// assert_eq!(parse_currency(""), dec!(0));
/// assert_eq!(parse_currency("N/A"), dec!(0));
/// ```
pub fn parse_currency(text: &str) -> Decimal {
    let cleaned = strip_non_numeric(text);
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    cleaned.parse().unwrap_or_else(|e| {
        warn!(input = %text, "unparseable currency, treating as zero: {e}");
        Decimal::ZERO
    })
}

/// Parses a percentage-rate string into a [`Decimal`]. Never fails.
///
/// Same absorption rules as [`parse_currency`]; a trailing `%` is ignored and
/// the sentinel `"N/A"` (written back after a manual-schedule save) parses
/// to zero.
pub fn parse_rate(text: &str) -> Decimal {
    parse_currency(text)
}

/// Formats an amount as the 2-decimal wire string used for write-backs.
///
/// ```
/// use depr_core::parse::format_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_amount(dec!(1234.5)), "1234.50");
/// assert_eq!(format_amount(dec!(0)), "0.00");
/// ```
pub fn format_amount(value: Decimal) -> String {
    format!("{:.2}", round_to_cents(value))
}

/// Formats a depreciation rate for display, to the nearest whole percent.
pub fn format_rate(value: Decimal) -> String {
    value
        .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}

//! Operator-editable schedule transforms.
//!
//! Every function here is pure: it takes a row slice and returns a new
//! vector. Invalid requests (out-of-range index, empty input, last remaining
//! row) degrade to the input unchanged rather than failing.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;

use crate::models::ScheduleRow;
use crate::schedule::common::{clamp_non_negative, round_to_cents};

/// Rounds every charge except the last up to a whole currency unit and folds
/// the accumulated fractional difference into the last row, leaving the
/// schedule total unchanged.
///
/// Net book values are rebuilt sequentially from the first row's
/// pre-depreciation value. No-op on an empty schedule.
pub fn apply_ceiling_rounding(rows: &[ScheduleRow]) -> Vec<ScheduleRow> {
    let Some((last, head)) = rows.split_last() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(rows.len());
    let mut adjustment = Decimal::ZERO;
    for row in head {
        let ceiled = row.depreciation.ceil();
        adjustment += row.depreciation - ceiled;
        out.push(ScheduleRow {
            depreciation: ceiled,
            ..row.clone()
        });
    }
    out.push(ScheduleRow {
        depreciation: round_to_cents(last.depreciation + adjustment),
        ..last.clone()
    });

    // opening value of the schedule, before any depreciation
    let mut net_book_value = rows[0].net_book_value + rows[0].depreciation;
    for row in &mut out {
        net_book_value = clamp_non_negative(round_to_cents(net_book_value - row.depreciation));
        row.net_book_value = net_book_value;
    }
    out
}

/// Replaces one row's depreciation charge and cascades the net-book-value
/// chain forward through the remaining rows, which keep their existing
/// charges.
///
/// The new charge is clamped at zero and rounded to cents. An out-of-range
/// index returns the input unchanged.
pub fn update_editable_row(
    rows: &[ScheduleRow],
    index: usize,
    new_depreciation: Decimal,
) -> Vec<ScheduleRow> {
    if index >= rows.len() {
        return rows.to_vec();
    }

    let mut out = rows.to_vec();
    let depreciation = round_to_cents(clamp_non_negative(new_depreciation));
    let opening = if index == 0 {
        rows[0].net_book_value + rows[0].depreciation
    } else {
        rows[index - 1].net_book_value
    };
    out[index].depreciation = depreciation;

    let mut net_book_value = clamp_non_negative(round_to_cents(opening - depreciation));
    out[index].net_book_value = net_book_value;
    for row in &mut out[index + 1..] {
        net_book_value = clamp_non_negative(round_to_cents(net_book_value - row.depreciation));
        row.net_book_value = net_book_value;
    }
    out
}

/// Appends a zero-charge row one period after the last row.
///
/// Monthly labels roll over the year boundary; yearly labels increment the
/// year. The new row inherits the last row's net book value. Appending to an
/// empty schedule is a no-op (the coordinator seeds the draft before ever
/// appending).
pub fn add_manual_row(rows: &[ScheduleRow], is_monthly: bool) -> Vec<ScheduleRow> {
    let Some(last) = rows.last() else {
        return Vec::new();
    };

    let label = if is_monthly {
        next_month_label(&last.label)
    } else {
        next_year_label(&last.label)
    };
    let mut out = rows.to_vec();
    out.push(ScheduleRow {
        label,
        depreciation: Decimal::ZERO,
        net_book_value: last.net_book_value,
        months: if is_monthly { 1 } else { 12 },
    });
    out
}

/// Drops the trailing row. A schedule keeps at least one row once non-empty,
/// so a single-row (or empty) input is returned unchanged.
pub fn remove_manual_row(rows: &[ScheduleRow]) -> Vec<ScheduleRow> {
    if rows.len() <= 1 {
        return rows.to_vec();
    }
    rows[..rows.len() - 1].to_vec()
}

/// `"2029"` or `"2029 (6 mths)"` → `"2030"`. Unparseable labels repeat.
fn next_year_label(label: &str) -> String {
    label
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<i32>().ok())
        .map(|year| (year + 1).to_string())
        .unwrap_or_else(|| label.to_string())
}

/// `"2024 Dec"` → `"2025 Jan"`. Unparseable labels repeat.
fn next_month_label(label: &str) -> String {
    NaiveDate::parse_from_str(&format!("{label} 1"), "%Y %b %d")
        .ok()
        .and_then(|date| date.checked_add_months(Months::new(1)))
        .map(|next| format!("{} {}", next.year(), next.format("%b")))
        .unwrap_or_else(|| label.to_string())
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One period of a depreciation schedule.
///
/// `label` is a display label: a calendar year (`"2025"`), a prorated year
/// (`"2025 (5 mths)"`), or a month (`"2024 Jul"`). `months` records how many
/// months of the asset's life the row consumes: 1–12 for a prorated yearly
/// row, otherwise 12 for yearly rows and 1 for monthly rows.
///
/// Amounts are held to two decimal places; `net_book_value` is never
/// negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub label: String,
    pub depreciation: Decimal,
    pub net_book_value: Decimal,
    pub months: u32,
}

impl ScheduleRow {
    /// Tolerance-based equality: identical label, amounts within 0.001.
    ///
    /// This is the comparison the coordinator uses to decide whether a
    /// regenerated schedule actually changed (and hence whether the
    /// ceiling-applied flag must reset).
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.label == other.label
            && amount_approx_eq(self.depreciation, other.depreciation)
            && amount_approx_eq(self.net_book_value, other.net_book_value)
    }
}

/// Slice-level [`ScheduleRow::approx_eq`]: equal length, pairwise match.
pub fn rows_approx_eq(a: &[ScheduleRow], b: &[ScheduleRow]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.approx_eq(y))
}

fn amount_approx_eq(a: Decimal, b: Decimal) -> bool {
    // 0.001
    (a - b).abs() <= Decimal::new(1, 3)
}

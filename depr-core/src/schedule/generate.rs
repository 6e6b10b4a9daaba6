//! Straight-line schedule generation with month-level proration.
//!
//! Both generators charge a flat per-month amount of
//! `(cost - residual) / total months` and force the final row to the exact
//! remainder, so rounding error never accumulates across the schedule: the
//! charges always sum to `cost - residual` and the terminal net book value
//! always lands on the residual.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;

use crate::models::ScheduleRow;
use crate::schedule::common::round_to_cents;

const MONTHS_PER_YEAR: u32 = 12;

/// Generates a yearly straight-line schedule.
///
/// The first row is prorated to the months remaining in the acquisition year
/// (a December acquisition leaves one month in year one); every later row
/// covers twelve months except possibly the last. Rows covering fewer than
/// twelve months carry a `"(<n> mths)"` label suffix.
///
/// Returns an empty schedule when the life is zero, the cost is not
/// positive, or the residual exceeds the cost.
///
/// # Examples
///
/// ```
/// use depr_core::schedule::generate_yearly;
/// use rust_decimal_macros::dec;
///
/// let rows = generate_yearly(dec!(12000), dec!(0), 5, 2024, 7);
///
/// assert_eq!(rows.len(), 6);
/// assert_eq!(rows[0].label, "2024 (6 mths)");
/// assert_eq!(rows[0].depreciation, dec!(1200.00));
/// assert_eq!(rows[5].net_book_value, dec!(0.00));
/// ```
pub fn generate_yearly(
    cost: Decimal,
    residual: Decimal,
    useful_life_years: u32,
    acquire_year: i32,
    acquire_month: u32,
) -> Vec<ScheduleRow> {
    if useful_life_years == 0 || cost <= Decimal::ZERO || cost - residual < Decimal::ZERO {
        return Vec::new();
    }

    let total_months = match useful_life_years.checked_mul(MONTHS_PER_YEAR) {
        Some(months) => months,
        None => return Vec::new(),
    };
    let depreciable = cost - residual;
    // total_months >= 12 here, so the division is safe
    let per_month = depreciable / Decimal::from(total_months);
    let acquire_month = acquire_month.clamp(1, 12);
    let first_row_months = (13 - acquire_month).min(total_months);

    let mut rows = Vec::new();
    let mut remaining = total_months;
    let mut charged = Decimal::ZERO;
    let mut net_book_value = cost;
    let mut year = acquire_year;

    while remaining > 0 {
        let months = if rows.is_empty() {
            first_row_months
        } else {
            remaining.min(MONTHS_PER_YEAR)
        };
        let depreciation = if months == remaining {
            // plug the last row with the exact remainder
            round_to_cents(depreciable - charged)
        } else {
            round_to_cents(per_month * Decimal::from(months))
        };
        charged += depreciation;
        net_book_value = round_to_cents(residual.max(net_book_value - depreciation));
        let label = if months < MONTHS_PER_YEAR {
            format!("{year} ({months} mths)")
        } else {
            year.to_string()
        };
        rows.push(ScheduleRow {
            label,
            depreciation,
            net_book_value,
            months,
        });
        remaining -= months;
        year += 1;
    }
    rows
}

/// Generates a monthly straight-line schedule, one row per month of life.
///
/// Row labels are `"<year> <3-letter month>"` (e.g. `"2024 Jul"`). The same
/// guards and plug-the-last-row rule as [`generate_yearly`] apply.
pub fn generate_monthly(
    cost: Decimal,
    residual: Decimal,
    useful_life_months: u32,
    acquire_year: i32,
    acquire_month: u32,
) -> Vec<ScheduleRow> {
    if useful_life_months == 0 || cost <= Decimal::ZERO || cost - residual < Decimal::ZERO {
        return Vec::new();
    }
    let Some(mut period) = NaiveDate::from_ymd_opt(acquire_year, acquire_month.clamp(1, 12), 1)
    else {
        return Vec::new();
    };

    let depreciable = cost - residual;
    let per_month = depreciable / Decimal::from(useful_life_months);

    let mut rows = Vec::with_capacity(useful_life_months as usize);
    let mut charged = Decimal::ZERO;
    let mut net_book_value = cost;

    for index in 0..useful_life_months {
        let depreciation = if index == useful_life_months - 1 {
            round_to_cents(depreciable - charged)
        } else {
            round_to_cents(per_month)
        };
        charged += depreciation;
        net_book_value = round_to_cents(residual.max(net_book_value - depreciation));
        rows.push(ScheduleRow {
            label: format!("{} {}", period.year(), period.format("%b")),
            depreciation,
            net_book_value,
            months: 1,
        });
        period = period.checked_add_months(Months::new(1)).unwrap_or(period);
    }
    rows
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn total_depreciation(rows: &[ScheduleRow]) -> Decimal {
        rows.iter().map(|r| r.depreciation).sum()
    }

    // =========================================================================
    // generate_yearly tests
    // =========================================================================

    #[test]
    fn yearly_prorates_first_and_last_year() {
        let rows = generate_yearly(dec!(12000), dec!(0), 5, 2024, 7);

        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].label, "2024 (6 mths)");
        assert_eq!(rows[0].months, 6);
        assert_eq!(rows[0].depreciation, dec!(1200.00));
        assert_eq!(rows[1].label, "2025");
        assert_eq!(rows[1].depreciation, dec!(2400.00));
        assert_eq!(rows[5].label, "2029 (6 mths)");
        assert_eq!(rows[5].depreciation, dec!(1200.00));
        assert_eq!(rows[5].net_book_value, dec!(0.00));
    }

    #[test]
    fn yearly_january_acquisition_has_no_proration() {
        let rows = generate_yearly(dec!(6000), dec!(0), 3, 2025, 1);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].label, "2025");
        assert_eq!(rows[0].months, 12);
        assert_eq!(rows[0].depreciation, dec!(2000.00));
    }

    #[test]
    fn yearly_december_acquisition_leaves_one_month_in_year_one() {
        let rows = generate_yearly(dec!(1200), dec!(0), 1, 2024, 12);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "2024 (1 mths)");
        assert_eq!(rows[0].months, 1);
        assert_eq!(rows[0].depreciation, dec!(100.00));
        assert_eq!(rows[1].label, "2025 (11 mths)");
        assert_eq!(rows[1].depreciation, dec!(1100.00));
    }

    #[test]
    fn yearly_last_row_absorbs_rounding_remainder() {
        // 1000 / 36 months = 27.7778/month; rounded yearly charges would drift
        let rows = generate_yearly(dec!(1000), dec!(0), 3, 2025, 1);

        assert_eq!(rows.len(), 3);
        assert_eq!(total_depreciation(&rows), dec!(1000.00));
        assert_eq!(rows[2].net_book_value, dec!(0.00));
    }

    #[test]
    fn yearly_stops_at_residual() {
        let rows = generate_yearly(dec!(10000), dec!(1000), 3, 2025, 1);

        assert_eq!(total_depreciation(&rows), dec!(9000.00));
        assert_eq!(rows[2].net_book_value, dec!(1000.00));
    }

    #[test]
    fn yearly_life_overflowing_the_month_count_yields_empty_schedule() {
        let rows = generate_yearly(dec!(1000), dec!(0), u32::MAX, 2024, 1);

        assert_eq!(rows, vec![]);
    }

    #[test]
    fn yearly_returns_empty_for_zero_life() {
        assert_eq!(generate_yearly(dec!(1000), dec!(0), 0, 2025, 1), vec![]);
    }

    #[test]
    fn yearly_returns_empty_for_non_positive_cost() {
        assert_eq!(generate_yearly(dec!(0), dec!(0), 5, 2025, 1), vec![]);
        assert_eq!(generate_yearly(dec!(-100), dec!(0), 5, 2025, 1), vec![]);
    }

    #[test]
    fn yearly_returns_empty_when_residual_exceeds_cost() {
        assert_eq!(generate_yearly(dec!(1000), dec!(2000), 5, 2025, 1), vec![]);
    }

    #[test]
    fn yearly_net_book_value_is_monotonic_and_non_negative() {
        let rows = generate_yearly(dec!(3333.33), dec!(0), 7, 2024, 4);

        let mut previous = dec!(3333.33);
        for row in &rows {
            assert!(row.net_book_value <= previous);
            assert!(row.net_book_value >= dec!(0));
            previous = row.net_book_value;
        }
    }

    // =========================================================================
    // generate_monthly tests
    // =========================================================================

    #[test]
    fn monthly_generates_one_row_per_month() {
        let rows = generate_monthly(dec!(12000), dec!(0), 60, 2024, 7);

        assert_eq!(rows.len(), 60);
        assert_eq!(rows[0].label, "2024 Jul");
        assert_eq!(rows[0].months, 1);
        for row in &rows[..59] {
            assert_eq!(row.depreciation, dec!(200.00));
        }
        assert_eq!(rows[59].depreciation, dec!(200.00));
        assert_eq!(rows[59].net_book_value, dec!(0.00));
    }

    #[test]
    fn monthly_labels_roll_over_year_boundary() {
        let rows = generate_monthly(dec!(300), dec!(0), 3, 2024, 11);

        assert_eq!(rows[0].label, "2024 Nov");
        assert_eq!(rows[1].label, "2024 Dec");
        assert_eq!(rows[2].label, "2025 Jan");
    }

    #[test]
    fn monthly_last_row_absorbs_rounding_remainder() {
        // 100 / 3 = 33.3333... per month
        let rows = generate_monthly(dec!(100), dec!(0), 3, 2025, 1);

        assert_eq!(rows[0].depreciation, dec!(33.33));
        assert_eq!(rows[1].depreciation, dec!(33.33));
        assert_eq!(rows[2].depreciation, dec!(33.34));
        assert_eq!(total_depreciation(&rows), dec!(100.00));
        assert_eq!(rows[2].net_book_value, dec!(0.00));
    }

    #[test]
    fn monthly_returns_empty_for_degenerate_inputs() {
        assert_eq!(generate_monthly(dec!(100), dec!(0), 0, 2025, 1), vec![]);
        assert_eq!(generate_monthly(dec!(0), dec!(0), 12, 2025, 1), vec![]);
        assert_eq!(generate_monthly(dec!(100), dec!(200), 12, 2025, 1), vec![]);
    }
}

//! Dependent-value resolution for the four interdependent financial fields.
//!
//! Cost is always external. Of the remaining four (useful life, residual
//! value, depreciation rate, total depreciation) the operator may pin any
//! subset; everything unpinned is recomputed here so the whole set stays
//! mutually consistent. The resolution order is fixed so that pinning exactly
//! one of residual value / total depreciation fully determines the other,
//! and a pinned rate (with a usable life) takes precedence over a stale
//! total when neither is pinned.
//!
//! Pure and total: no input combination fails. Divisions that would not be
//! finite collapse to zero, and derived lives are whole periods with a floor
//! of one.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::models::{FinancialInputs, PinnedFields};
use crate::schedule::common::{clamp_non_negative, round_to_cents};

const DEFAULT_MONTHLY_LIFE: u32 = 12;

/// Values derived for the unpinned fields. Pinned fields are always `None`
/// and must be left untouched by the caller.
///
/// Monetary amounts come back rounded to cents; the rate is left unrounded
/// (the caller formats for display, typically to the nearest whole percent).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFields {
    pub useful_life: Option<u32>,
    pub residual_value: Option<Decimal>,
    pub depreciation_rate: Option<Decimal>,
    pub total_depreciation: Option<Decimal>,
}

impl ResolvedFields {
    pub fn is_empty(&self) -> bool {
        self.useful_life.is_none()
            && self.residual_value.is_none()
            && self.depreciation_rate.is_none()
            && self.total_depreciation.is_none()
    }
}

/// Resolves every unpinned field against the current inputs.
///
/// `skip_useful_life` is the coordinator's one-shot suppression: right after
/// a switch to monthly frequency the freshly defaulted life must survive one
/// resolution pass instead of being immediately re-derived.
pub fn resolve_dependents(
    inputs: &FinancialInputs,
    pins: &PinnedFields,
    monthly: bool,
    skip_useful_life: bool,
) -> ResolvedFields {
    let cost = inputs.cost;
    let mut out = ResolvedFields::default();

    // Zero-cost assets degenerate: nothing to depreciate.
    if cost <= Decimal::ZERO {
        if !pins.residual_value {
            out.residual_value = Some(Decimal::ZERO);
        }
        if !pins.total_depreciation {
            out.total_depreciation = Some(Decimal::ZERO);
        }
        if !pins.depreciation_rate {
            out.depreciation_rate = Some(Decimal::ZERO);
        }
        if monthly && !pins.useful_life && !skip_useful_life {
            out.useful_life = Some(DEFAULT_MONTHLY_LIFE);
        }
        return out;
    }

    let mut residual = inputs.residual_value;
    let mut total = inputs.total_depreciation;
    let rate_in = inputs.depreciation_rate;

    if !pins.residual_value && pins.total_depreciation {
        residual = round_to_cents(clamp_non_negative(cost - total));
        out.residual_value = Some(residual);
    } else if !pins.total_depreciation && pins.residual_value {
        total = round_to_cents(clamp_non_negative(cost - residual));
        out.total_depreciation = Some(total);
    } else if !pins.residual_value && !pins.total_depreciation {
        // A pinned rate with a usable life wins over the (possibly stale)
        // current total.
        residual = if pins.depreciation_rate
            && inputs.useful_life > 0
            && rate_in > Decimal::ZERO
        {
            let depreciable =
                cost * (rate_in / Decimal::ONE_HUNDRED) * Decimal::from(inputs.useful_life);
            round_to_cents(clamp_non_negative(cost - depreciable))
        } else {
            round_to_cents(clamp_non_negative(cost - total))
        };
        total = round_to_cents(clamp_non_negative(cost - residual));
        out.residual_value = Some(residual);
        out.total_depreciation = Some(total);
    }

    if !pins.depreciation_rate {
        out.depreciation_rate = Some(rate_from_life(
            cost,
            residual,
            effective_life(inputs.useful_life, monthly),
        ));
    }

    if !pins.useful_life && !skip_useful_life {
        // Tie-break: a pinned rate drives the derived life; otherwise fall
        // back to the per-period charge implied by the current total/life.
        let derived = if pins.depreciation_rate && rate_in > Decimal::ZERO {
            life_from_rate(cost, residual, rate_in)
        } else if total > Decimal::ZERO && inputs.useful_life > 0 {
            let implied_charge = total / Decimal::from(inputs.useful_life);
            whole_periods((cost - residual).checked_div(implied_charge))
        } else {
            None
        };
        let fallback = if monthly {
            DEFAULT_MONTHLY_LIFE
        } else {
            inputs.useful_life.max(1)
        };
        let life = derived.unwrap_or(fallback);
        out.useful_life = Some(life);

        // Keep the pair consistent with the life that was just derived.
        if !pins.depreciation_rate {
            out.depreciation_rate =
                Some(rate_from_life(cost, residual, effective_life(life, monthly)));
        }
    }

    out
}

/// Life used for rate derivation: the current life when positive, the
/// monthly default when monthly, otherwise unusable (zero).
fn effective_life(life: u32, monthly: bool) -> u32 {
    if life > 0 {
        life
    } else if monthly {
        DEFAULT_MONTHLY_LIFE
    } else {
        0
    }
}

/// `rate = (cost - residual) / (cost * life) * 100`; zero when undefined.
fn rate_from_life(cost: Decimal, residual: Decimal, life: u32) -> Decimal {
    if life == 0 {
        return Decimal::ZERO;
    }
    (cost - residual)
        .checked_div(cost * Decimal::from(life))
        .map(|r| r * Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::ZERO)
}

/// `life = (cost - residual) / (cost * rate / 100)`, in whole periods.
fn life_from_rate(cost: Decimal, residual: Decimal, rate: Decimal) -> Option<u32> {
    let denominator = cost * (rate / Decimal::ONE_HUNDRED);
    whole_periods((cost - residual).checked_div(denominator))
}

fn whole_periods(value: Option<Decimal>) -> Option<u32> {
    value
        .and_then(|v| {
            v.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
                .to_u32()
        })
        .map(|v| v.max(1))
}

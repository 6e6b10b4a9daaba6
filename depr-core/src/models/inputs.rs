use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The five financial quantities a depreciation schedule is derived from.
///
/// `cost` is external and always authoritative. The other four are
/// interdependent; which of them are recomputed on a change is decided by
/// [`PinnedFields`] (see [`crate::resolver`]).
///
/// `useful_life` is measured in years under a yearly frequency and in months
/// under a monthly one. `depreciation_rate` is a percentage per period unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialInputs {
    pub cost: Decimal,
    pub residual_value: Decimal,
    pub useful_life: u32,
    pub depreciation_rate: Decimal,
    pub total_depreciation: Decimal,
}

/// Per-field manual-override flags.
///
/// `true` means the operator has pinned the field and the resolver must leave
/// it untouched. Cost is implicitly always pinned and has no flag here. Any
/// combination is tolerated, including none or all pinned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedFields {
    pub useful_life: bool,
    pub residual_value: bool,
    pub depreciation_rate: bool,
    pub total_depreciation: bool,
}

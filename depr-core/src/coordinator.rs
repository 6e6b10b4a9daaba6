//! Schedule coordination: sequencing of dependent-value resolution and
//! schedule regeneration, edit-session drafts, and the method/frequency
//! transition rules.
//!
//! The coordinator is single-threaded and synchronous. The host calls
//! [`ScheduleCoordinator::handle_field_change`] on every relevant field
//! change; within one call the order is fixed (resolver first, generator
//! second) and every proposed write-back is compared against the field's
//! current value in display format and dropped when equal, so feeding the
//! engine's own output back in never produces further writes.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{
    FinancialInputs, Frequency, Method, PinnedFields, ScheduleRow, ScheduleState, rows_approx_eq,
};
use crate::parse::{format_amount, format_rate, parse_currency, parse_rate};
use crate::resolver::{ResolvedFields, resolve_dependents};
use crate::schedule::common::round_to_cents;
use crate::schedule::{
    add_manual_row, apply_ceiling_rounding, generate_monthly, generate_yearly, remove_manual_row,
    update_editable_row,
};

/// Sentinel written to the rate field once a manual schedule is committed;
/// a single rate is no longer meaningful for operator-authored rows.
const RATE_NOT_APPLICABLE: &str = "N/A";

const DEFAULT_MONTHLY_LIFE: u32 = 12;

/// Current host form-field values, as the host stores them.
///
/// Currency fields cross the boundary as strings; the engine parses them
/// (and never the host). `useful_life` is years under a yearly frequency,
/// months under a monthly one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValues {
    pub cost: String,
    pub residual_value: String,
    pub depreciation_rate: String,
    pub total_depreciation: String,
    pub useful_life: u32,
    pub acquire_date: NaiveDate,
}

impl FieldValues {
    fn to_inputs(&self) -> FinancialInputs {
        FinancialInputs {
            cost: parse_currency(&self.cost),
            residual_value: parse_currency(&self.residual_value),
            useful_life: self.useful_life,
            depreciation_rate: parse_rate(&self.depreciation_rate),
            total_depreciation: parse_currency(&self.total_depreciation),
        }
    }
}

/// A derived value the host must persist into its own field storage.
///
/// Monetary values are pre-formatted 2-decimal strings; the rate is a whole
/// percent or the `"N/A"` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteBack {
    ResidualValue(String),
    TotalDepreciation(String),
    DepreciationRate(String),
    UsefulLife(u32),
}

/// The operator declined a frequency change that would have discarded a
/// non-empty manual schedule. Engine state is left exactly as it was; the
/// host must revert the triggering field change.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("frequency change declined; existing schedule kept")]
pub struct FrequencyChangeDeclined;

/// Owns the committed schedule, the edit-session draft, and the transition
/// rules between straight-line and manual methods.
///
/// Initial state: straight-line, yearly, no rows, not editing.
#[derive(Debug, Default)]
pub struct ScheduleCoordinator {
    method: Method,
    frequency: Frequency,
    rows: Vec<ScheduleRow>,
    editable_rows: Vec<ScheduleRow>,
    is_editing: bool,
    ceiling_applied: bool,
    suppress_next_life_resolution: bool,
}

impl ScheduleCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Snapshot for rendering.
    pub fn state(&self) -> ScheduleState {
        ScheduleState {
            rows: self.rows.clone(),
            editable_rows: self.editable_rows.clone(),
            is_editing: self.is_editing,
            is_manual: self.method == Method::Manual,
            is_monthly: self.frequency.is_monthly(),
            ceiling_applied: self.ceiling_applied,
        }
    }

    /// Reacts to a change of cost, residual value, useful life, rate, total
    /// depreciation, or acquisition date.
    ///
    /// Under straight-line: resolves the unpinned dependents, regenerates the
    /// schedule from the resolved values, and returns the write-backs whose
    /// formatted value differs from the field's current one. Under manual
    /// (or mid-edit) the committed schedule is frozen and nothing happens.
    pub fn handle_field_change(
        &mut self,
        fields: &FieldValues,
        pins: &PinnedFields,
    ) -> Vec<WriteBack> {
        if self.is_editing || self.method == Method::Manual {
            return Vec::new();
        }

        let inputs = fields.to_inputs();
        let skip_life = self.suppress_next_life_resolution;
        self.suppress_next_life_resolution = false;
        let resolved = resolve_dependents(&inputs, pins, self.frequency.is_monthly(), skip_life);
        let writes = self.resolution_write_backs(&inputs, &resolved);

        let residual = resolved.residual_value.unwrap_or(inputs.residual_value);
        let life = resolved.useful_life.unwrap_or(inputs.useful_life);
        self.regenerate(inputs.cost, residual, life, fields.acquire_date);
        writes
    }

    /// Switches the depreciation method.
    ///
    /// Straight-line → manual seeds the manual schedule from the current rows
    /// (regenerating a straight-line basis first when none exist) and freezes
    /// it. Manual → straight-line discards the manual rows and resumes
    /// automatic regeneration; ignored mid-edit.
    pub fn set_method(
        &mut self,
        method: Method,
        fields: &FieldValues,
        pins: &PinnedFields,
    ) -> Vec<WriteBack> {
        if method == self.method {
            return Vec::new();
        }
        match method {
            Method::Manual => {
                if self.rows.is_empty() {
                    let inputs = fields.to_inputs();
                    self.regenerate(
                        inputs.cost,
                        inputs.residual_value,
                        inputs.useful_life,
                        fields.acquire_date,
                    );
                }
                self.method = Method::Manual;
                debug!(rows = self.rows.len(), "method switched to manual");
                Vec::new()
            }
            Method::StraightLine => {
                if self.is_editing {
                    debug!("method switch to straight-line ignored mid-edit");
                    return Vec::new();
                }
                self.method = Method::StraightLine;
                self.rows.clear();
                self.ceiling_applied = false;
                debug!("method switched to straight-line, manual schedule discarded");
                self.handle_field_change(fields, pins)
            }
        }
    }

    /// Switches the schedule frequency.
    ///
    /// Destructive case: under manual with a non-empty schedule, `confirm`
    /// must return `true`; the existing custom rows are then replaced by a
    /// fresh straight-line basis under the new frequency (method stays
    /// manual). On decline nothing changes and the host must revert the
    /// triggering field change.
    ///
    /// Under straight-line a switch to monthly with an unpinned useful life
    /// defaults the life to 12 months and arms a one-shot suppression so the
    /// next resolution pass does not immediately overwrite the default.
    ///
    /// Refused outright while an edit session is open: the committed rows
    /// must stay the draft's restore point until the session ends.
    pub fn change_frequency(
        &mut self,
        frequency: Frequency,
        fields: &FieldValues,
        pins: &PinnedFields,
        confirm: impl FnOnce() -> bool,
    ) -> Result<Vec<WriteBack>, FrequencyChangeDeclined> {
        if frequency == self.frequency {
            return Ok(Vec::new());
        }
        if self.is_editing {
            debug!("frequency change refused mid-edit");
            return Err(FrequencyChangeDeclined);
        }

        if self.method == Method::Manual && !self.rows.is_empty() {
            if !confirm() {
                debug!("frequency change declined, manual schedule kept");
                return Err(FrequencyChangeDeclined);
            }
            self.frequency = frequency;
            let inputs = fields.to_inputs();
            self.regenerate(
                inputs.cost,
                inputs.residual_value,
                inputs.useful_life,
                fields.acquire_date,
            );
            debug!(
                frequency = frequency.as_str(),
                "manual schedule rebuilt on straight-line basis"
            );
            return Ok(Vec::new());
        }

        self.frequency = frequency;
        let mut writes = Vec::new();
        if self.method == Method::StraightLine {
            let mut life = fields.useful_life;
            if frequency.is_monthly() && !pins.useful_life {
                life = DEFAULT_MONTHLY_LIFE;
                self.suppress_next_life_resolution = true;
                if fields.useful_life != DEFAULT_MONTHLY_LIFE {
                    writes.push(WriteBack::UsefulLife(DEFAULT_MONTHLY_LIFE));
                }
            }
            let inputs = fields.to_inputs();
            self.regenerate(inputs.cost, inputs.residual_value, life, fields.acquire_date);
        }
        Ok(writes)
    }

    /// Opens an edit session over a draft copy of the effective rows.
    pub fn enter_edit(&mut self) {
        if self.is_editing {
            return;
        }
        self.editable_rows = self.rows.clone();
        self.is_editing = true;
    }

    /// Discards the draft and restores the pre-edit view.
    pub fn cancel_edit(&mut self) {
        if !self.is_editing {
            return;
        }
        self.editable_rows.clear();
        self.is_editing = false;
        self.ceiling_applied = false;
    }

    /// Commits the draft as the manual schedule (forcing the manual method)
    /// and returns the summary write-backs: residual value = terminal net
    /// book value, total depreciation = cost − terminal net book value, and
    /// the `"N/A"` rate sentinel. Pinned fields are skipped.
    pub fn save_edit(&mut self, fields: &FieldValues, pins: &PinnedFields) -> Vec<WriteBack> {
        if !self.is_editing {
            return Vec::new();
        }
        self.rows = std::mem::take(&mut self.editable_rows);
        self.method = Method::Manual;
        self.is_editing = false;
        self.ceiling_applied = false;
        debug!(rows = self.rows.len(), "edited schedule committed as manual");
        self.manual_summary_write_backs(fields, pins)
    }

    /// Applies ceiling rounding.
    ///
    /// Mid-edit this transforms the draft only. Outside an edit session it
    /// transforms the effective rows and commits them as the manual schedule,
    /// with the same summary write-backs as a save.
    pub fn apply_ceiling_rounding(
        &mut self,
        fields: &FieldValues,
        pins: &PinnedFields,
    ) -> Vec<WriteBack> {
        if self.is_editing {
            self.editable_rows = apply_ceiling_rounding(&self.editable_rows);
            self.ceiling_applied = true;
            return Vec::new();
        }
        if self.rows.is_empty() {
            return Vec::new();
        }
        self.rows = apply_ceiling_rounding(&self.rows);
        self.method = Method::Manual;
        self.ceiling_applied = true;
        debug!("ceiling-rounded schedule committed as manual");
        self.manual_summary_write_backs(fields, pins)
    }

    /// Replaces one draft row's charge (edit sessions only). The value
    /// arrives as a currency string, like every amount crossing the boundary.
    pub fn update_row(&mut self, index: usize, depreciation: &str) {
        if !self.is_editing {
            return;
        }
        let value = parse_currency(depreciation);
        self.editable_rows = update_editable_row(&self.editable_rows, index, value);
    }

    /// Appends a trailing draft row (edit sessions only), seeding the draft
    /// from the committed rows first if it is empty.
    pub fn add_row(&mut self) {
        if !self.is_editing {
            return;
        }
        if self.editable_rows.is_empty() {
            self.editable_rows = self.rows.clone();
        }
        self.editable_rows = add_manual_row(&self.editable_rows, self.frequency.is_monthly());
    }

    /// Removes the trailing draft row (edit sessions only); the draft keeps
    /// at least one row.
    pub fn remove_row(&mut self) {
        if !self.is_editing {
            return;
        }
        if self.editable_rows.is_empty() {
            self.editable_rows = self.rows.clone();
        }
        self.editable_rows = remove_manual_row(&self.editable_rows);
    }

    fn regenerate(&mut self, cost: Decimal, residual: Decimal, life: u32, acquire_date: NaiveDate) {
        let year = acquire_date.year();
        let month = acquire_date.month();
        let rows = match self.frequency {
            Frequency::Yearly => generate_yearly(cost, residual, life, year, month),
            Frequency::Monthly => generate_monthly(cost, residual, life, year, month),
        };
        if !rows_approx_eq(&rows, &self.rows) {
            self.ceiling_applied = false;
        }
        self.rows = rows;
    }

    /// Write-backs for a resolution pass, each suppressed when the formatted
    /// proposal already matches the field's current formatted value.
    fn resolution_write_backs(
        &self,
        inputs: &FinancialInputs,
        resolved: &ResolvedFields,
    ) -> Vec<WriteBack> {
        let mut writes = Vec::new();
        if let Some(value) = resolved.residual_value {
            let proposed = format_amount(value);
            if proposed != format_amount(inputs.residual_value) {
                writes.push(WriteBack::ResidualValue(proposed));
            }
        }
        if let Some(value) = resolved.total_depreciation {
            let proposed = format_amount(value);
            if proposed != format_amount(inputs.total_depreciation) {
                writes.push(WriteBack::TotalDepreciation(proposed));
            }
        }
        if let Some(value) = resolved.depreciation_rate {
            let proposed = format_rate(value);
            if proposed != format_rate(inputs.depreciation_rate) {
                writes.push(WriteBack::DepreciationRate(proposed));
            }
        }
        if let Some(value) = resolved.useful_life {
            if value != inputs.useful_life {
                writes.push(WriteBack::UsefulLife(value));
            }
        }
        writes
    }

    /// Summary write-backs after a manual commit (save or ceiling): keep the
    /// residual/total fields consistent with the terminal net book value.
    fn manual_summary_write_backs(
        &self,
        fields: &FieldValues,
        pins: &PinnedFields,
    ) -> Vec<WriteBack> {
        let Some(last) = self.rows.last() else {
            return Vec::new();
        };
        let cost = parse_currency(&fields.cost);
        let mut writes = Vec::new();
        if !pins.residual_value {
            let proposed = format_amount(last.net_book_value);
            if proposed != format_amount(parse_currency(&fields.residual_value)) {
                writes.push(WriteBack::ResidualValue(proposed));
            }
        }
        if !pins.total_depreciation {
            let proposed = format_amount(round_to_cents(cost - last.net_book_value));
            if proposed != format_amount(parse_currency(&fields.total_depreciation)) {
                writes.push(WriteBack::TotalDepreciation(proposed));
            }
        }
        if !pins.depreciation_rate && fields.depreciation_rate != RATE_NOT_APPLICABLE {
            writes.push(WriteBack::DepreciationRate(RATE_NOT_APPLICABLE.to_string()));
        }
        writes
    }
}

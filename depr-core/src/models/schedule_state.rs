use serde::{Deserialize, Serialize};

use super::ScheduleRow;

/// Outbound snapshot of the coordinator's schedule state, handed to the host
/// for rendering.
///
/// `rows` is the schedule currently in effect (generated rows under
/// straight-line, committed manual rows under manual). `editable_rows` is the
/// draft copy and is non-empty only while an edit session is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleState {
    pub rows: Vec<ScheduleRow>,
    pub editable_rows: Vec<ScheduleRow>,
    pub is_editing: bool,
    pub is_manual: bool,
    pub is_monthly: bool,
    pub ceiling_applied: bool,
}

mod frequency;
mod inputs;
mod method;
mod schedule_row;
mod schedule_state;

pub use frequency::Frequency;
pub use inputs::{FinancialInputs, PinnedFields};
pub use method::Method;
pub use schedule_row::{ScheduleRow, rows_approx_eq};
pub use schedule_state::ScheduleState;

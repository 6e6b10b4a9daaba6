//! Depreciation schedule derivation engine for a fixed-asset register.
//!
//! Given an asset's cost, residual value, useful life, depreciation rate and
//! total depreciation, this crate resolves which of those interdependent
//! quantities are operator-overridden versus derived, generates a
//! period-by-period straight-line schedule with month-level proration, and
//! supports operator-editable manual schedules and a total-preserving
//! ceiling-rounding transform.
//!
//! The engine is pure and in-process: it performs no I/O, knows nothing
//! about widgets, and persists nothing. The host supplies field values and
//! receives derived values back (see [`coordinator::ScheduleCoordinator`]).

pub mod coordinator;
pub mod models;
pub mod parse;
pub mod resolver;
pub mod schedule;

pub use coordinator::{FieldValues, FrequencyChangeDeclined, ScheduleCoordinator, WriteBack};
pub use models::*;
pub use resolver::{ResolvedFields, resolve_dependents};

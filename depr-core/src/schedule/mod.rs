//! Pure schedule arithmetic: straight-line generation, ceiling-rounding
//! redistribution, and manual-row editing.
//!
//! Nothing in here knows about pinned fields, methods, or edit sessions;
//! that sequencing lives in [`crate::coordinator`].

pub mod common;
pub mod generate;
pub mod manual;

pub use generate::{generate_monthly, generate_yearly};
pub use manual::{add_manual_row, apply_ceiling_rounding, remove_manual_row, update_editable_row};

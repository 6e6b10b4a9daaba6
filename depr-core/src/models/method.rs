use serde::{Deserialize, Serialize};

/// Depreciation method for an asset.
///
/// `StraightLine` schedules are fully derived from the financial inputs and
/// regenerated on every relevant field change. `Manual` schedules are
/// operator-authored: once committed they are frozen and field changes no
/// longer touch them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    #[default]
    StraightLine,
    Manual,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StraightLine => "straight-line",
            Self::Manual => "manual",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "straight-line" => Some(Self::StraightLine),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Period granularity of a depreciation schedule.
///
/// The frequency also changes the unit of the useful-life field: years when
/// `Yearly`, months when `Monthly`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    #[default]
    Yearly,
    Monthly,
}

impl Frequency {
    pub fn is_monthly(self) -> bool {
        matches!(self, Self::Monthly)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yearly => "yearly",
            Self::Monthly => "monthly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "yearly" => Some(Self::Yearly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }
}

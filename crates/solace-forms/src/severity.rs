//! The fixed 0–4 clinical severity scale used across assessment dimensions.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Label mapping for a 0–4 severity rating. A pure function of the rating,
/// not stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    None,
    Mild,
    Moderate,
    Severe,
    VerySevere,
}

impl Severity {
    pub fn from_rating(value: i64) -> Option<Self> {
        match value {
            0 => Some(Severity::None),
            1 => Some(Severity::Mild),
            2 => Some(Severity::Moderate),
            3 => Some(Severity::Severe),
            4 => Some(Severity::VerySevere),
            _ => None,
        }
    }

    pub fn rating(self) -> i64 {
        match self {
            Severity::None => 0,
            Severity::Mild => 1,
            Severity::Moderate => 2,
            Severity::Severe => 3,
            Severity::VerySevere => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::None => "None",
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
            Severity::VerySevere => "Very Severe",
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkloadStatus {
    Overloaded,
    #[serde(rename = "In Focus")]
    InFocus,
    Balanced,
    Available,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Red,
    Orange,
    Green,
}

/// Inclusive lower bounds, checked top to bottom. Anything below the last
/// bound is `Available`.
const THRESHOLDS: [(f64, WorkloadStatus); 3] = [
    (90.0, WorkloadStatus::Overloaded),
    (70.0, WorkloadStatus::InFocus),
    (40.0, WorkloadStatus::Balanced),
];

/// Classifies the unrounded share, so 89.6% is still `InFocus` even though
/// it is reported as 90.
pub fn classify(share: f64) -> WorkloadStatus {
    THRESHOLDS
        .iter()
        .find(|(floor, _)| share >= *floor)
        .map(|(_, status)| *status)
        .unwrap_or(WorkloadStatus::Available)
}

impl WorkloadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadStatus::Overloaded => "Overloaded",
            WorkloadStatus::InFocus => "In Focus",
            WorkloadStatus::Balanced => "Balanced",
            WorkloadStatus::Available => "Available",
        }
    }

    pub fn color(&self) -> StatusColor {
        match self {
            WorkloadStatus::Overloaded => StatusColor::Red,
            WorkloadStatus::InFocus => StatusColor::Orange,
            WorkloadStatus::Balanced | WorkloadStatus::Available => StatusColor::Green,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkloadStatus::Overloaded => "🔴",
            WorkloadStatus::InFocus => "🟠",
            WorkloadStatus::Balanced | WorkloadStatus::Available => "🟢",
        }
    }
}

impl fmt::Display for WorkloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

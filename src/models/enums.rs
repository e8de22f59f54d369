use serde::{Deserialize, Serialize};
use std::fmt;

/// When a medication is taken during the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MedicationTime {
    Morning,
    Evening,
}

impl MedicationTime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Evening => "evening",
        }
    }
}

impl fmt::Display for MedicationTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a medication is administered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MedicationType {
    Oral,
    Topical,
}

impl MedicationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Oral => "oral",
            Self::Topical => "topical",
        }
    }
}

impl fmt::Display for MedicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Structured medication records attached to an analysis request.
//!
//! Intake accepts medications either as free text ("Moisturizer,
//! antihistamine") or as a JSON array of structured records. A record
//! only counts when its name is non-empty.

use serde::{Deserialize, Serialize};

use super::enums::{MedicationTime, MedicationType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub time: MedicationTime,
    #[serde(rename = "type")]
    pub kind: MedicationType,
}

impl Medication {
    pub fn new(name: &str, time: MedicationTime, kind: MedicationType) -> Self {
        Self {
            name: name.to_string(),
            time,
            kind,
        }
    }

    /// Whether the record counts as an actual medication entry.
    pub fn is_counted(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// The medications field as submitted by intake: either structured
/// records or free text. Structured input is a JSON-encoded array.
#[derive(Debug, Clone, PartialEq)]
pub enum MedicationInput {
    Structured(Vec<Medication>),
    FreeText(String),
}

impl MedicationInput {
    /// Parse a raw form field. A value that parses as a JSON array of
    /// medication records is structured input; anything else is treated
    /// as free text. Structured entries with empty names are dropped.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with('[') {
            if let Ok(meds) = serde_json::from_str::<Vec<Medication>>(trimmed) {
                return Self::Structured(
                    meds.into_iter().filter(Medication::is_counted).collect(),
                );
            }
        }
        Self::FreeText(trimmed.to_string())
    }

    /// Medication names, in submission order.
    pub fn names(&self) -> Vec<String> {
        match self {
            Self::Structured(meds) => meds.iter().map(|m| m.name.clone()).collect(),
            Self::FreeText(text) => split_free_text(text),
        }
    }

    /// The value forwarded on the wire (delegated backend form field).
    pub fn as_form_text(&self) -> String {
        match self {
            Self::Structured(meds) => meds
                .iter()
                .map(|m| m.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            Self::FreeText(text) => text.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names().is_empty()
    }
}

/// Split comma-separated free text into trimmed, non-empty entries.
/// A value without commas yields a single entry.
pub fn split_free_text(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

//! The observation report — the central entity of the service.
//!
//! A report is immutable once produced by the analysis gateway; the
//! renderer never mutates it. Wire field names are snake_case and match
//! the delegated analysis service. Array fields default to empty so a
//! response missing optional fields still deserializes.

use serde::{Deserialize, Serialize};

/// Fixed safety notice, always present on every report.
pub const DISCLAIMER: &str = "This is not medical advice. This report is a preliminary visual \
analysis only. Please consult a qualified healthcare provider for any medical concerns.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub visual_observations: Vec<String>,
    #[serde(default)]
    pub user_reported_symptoms: Vec<String>,
    #[serde(default)]
    pub current_medications: Vec<String>,
    #[serde(default)]
    pub duration_of_symptoms: String,
    #[serde(default)]
    pub possible_non_diagnostic_causes: Vec<String>,
    #[serde(default)]
    pub general_advice: Vec<String>,
    #[serde(default = "default_disclaimer")]
    pub disclaimer: String,
}

fn default_disclaimer() -> String {
    DISCLAIMER.to_string()
}

impl Report {
    /// A report carrying only a model-generated summary. Used by the
    /// direct and staged strategies, which have no structured backend.
    pub fn summary_only(summary: String) -> Self {
        Self {
            summary,
            visual_observations: Vec::new(),
            user_reported_symptoms: Vec::new(),
            current_medications: Vec::new(),
            duration_of_symptoms: String::new(),
            possible_non_diagnostic_causes: Vec::new(),
            general_advice: Vec::new(),
            disclaimer: DISCLAIMER.to_string(),
        }
    }

    /// Whether the report carries any content beyond the disclaimer.
    pub fn has_content(&self) -> bool {
        !self.summary.trim().is_empty()
            || !self.visual_observations.is_empty()
            || !self.user_reported_symptoms.is_empty()
            || !self.current_medications.is_empty()
            || !self.duration_of_symptoms.trim().is_empty()
            || !self.possible_non_diagnostic_causes.is_empty()
            || !self.general_advice.is_empty()
    }
}

/// A stored report plus its generated identifier and the reference to
/// the image it was produced from (public URL or data URL, if any).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportHandle {
    pub id: String,
    pub report: Report,
    pub image_reference: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_only_carries_disclaimer() {
        let report = Report::summary_only("Mild redness is visible.".into());
        assert_eq!(report.summary, "Mild redness is visible.");
        assert_eq!(report.disclaimer, DISCLAIMER);
        assert!(report.visual_observations.is_empty());
        assert!(report.has_content());
    }

    #[test]
    fn missing_array_fields_default_to_empty() {
        let json = r#"{"summary":"ok","duration_of_symptoms":"2 weeks"}"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.summary, "ok");
        assert_eq!(report.duration_of_symptoms, "2 weeks");
        assert!(report.general_advice.is_empty());
        assert!(report.user_reported_symptoms.is_empty());
        assert_eq!(report.disclaimer, DISCLAIMER);
    }

    #[test]
    fn empty_object_parses_to_empty_report() {
        let report: Report = serde_json::from_str("{}").unwrap();
        assert!(!report.has_content());
        assert_eq!(report.disclaimer, DISCLAIMER);
    }

    #[test]
    fn wire_names_are_snake_case() {
        let report = Report::summary_only("s".into());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("visual_observations").is_some());
        assert!(json.get("possible_non_diagnostic_causes").is_some());
        assert!(json.get("user_reported_symptoms").is_some());
    }

    #[test]
    fn full_report_round_trips() {
        let report = Report {
            summary: "Preliminary visual analysis completed.".into(),
            visual_observations: vec!["dry patches".into()],
            user_reported_symptoms: vec!["itching".into(), "redness".into()],
            current_medications: vec!["Moisturizer".into()],
            duration_of_symptoms: "2 weeks".into(),
            possible_non_diagnostic_causes: vec!["Environmental factors (dry air, allergens)".into()],
            general_advice: vec!["Keep the area clean and moisturized.".into()],
            disclaimer: DISCLAIMER.into(),
        };
        let json = serde_json::to_string(&report).unwrap();
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}

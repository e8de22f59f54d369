//! Section layout for a resolved report.
//!
//! Each populated section renders only when non-empty; empty strings
//! and sequences suppress theirs. The disclaimer is not a section —
//! it is always present.

use serde::Serialize;

use crate::i18n::{strings, Locale};
use crate::models::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    VisualObservations,
    UserReportedSymptoms,
    CurrentMedications,
    DurationOfSymptoms,
    PossibleCauses,
    GeneralAdvice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SectionBody {
    Text(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSection {
    pub kind: SectionKind,
    pub title: &'static str,
    pub body: SectionBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

/// Lay a report out into its non-empty sections, titled per locale.
pub fn layout(report: &Report, locale: Locale) -> Vec<RenderedSection> {
    let t = &strings(locale).report;
    let mut sections = Vec::new();

    if !report.summary.trim().is_empty() {
        sections.push(RenderedSection {
            kind: SectionKind::Summary,
            title: t.summary,
            body: SectionBody::Text(report.summary.clone()),
            note: None,
        });
    }
    if !report.visual_observations.is_empty() {
        sections.push(RenderedSection {
            kind: SectionKind::VisualObservations,
            title: t.visual_observations,
            body: SectionBody::List(report.visual_observations.clone()),
            note: None,
        });
    }
    if !report.user_reported_symptoms.is_empty() {
        sections.push(RenderedSection {
            kind: SectionKind::UserReportedSymptoms,
            title: t.user_reported_symptoms,
            body: SectionBody::List(report.user_reported_symptoms.clone()),
            note: None,
        });
    }
    if !report.current_medications.is_empty() {
        sections.push(RenderedSection {
            kind: SectionKind::CurrentMedications,
            title: t.current_medications,
            body: SectionBody::List(report.current_medications.clone()),
            note: None,
        });
    }
    if !report.duration_of_symptoms.trim().is_empty() {
        sections.push(RenderedSection {
            kind: SectionKind::DurationOfSymptoms,
            title: t.duration_of_symptoms,
            body: SectionBody::Text(report.duration_of_symptoms.clone()),
            note: None,
        });
    }
    if !report.possible_non_diagnostic_causes.is_empty() {
        sections.push(RenderedSection {
            kind: SectionKind::PossibleCauses,
            title: t.possible_causes,
            body: SectionBody::List(report.possible_non_diagnostic_causes.clone()),
            note: Some(t.possible_causes_note),
        });
    }
    if !report.general_advice.is_empty() {
        sections.push(RenderedSection {
            kind: SectionKind::GeneralAdvice,
            title: t.general_advice,
            body: SectionBody::List(report.general_advice.clone()),
            note: None,
        });
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DISCLAIMER;

    fn full_report() -> Report {
        Report {
            summary: "Visual observations may be consistent with the described areas.".into(),
            visual_observations: vec!["dry patches".into()],
            user_reported_symptoms: vec!["itching".into(), "redness".into(), "flareup".into()],
            current_medications: vec!["Moisturizer".into(), "antihistamine".into()],
            duration_of_symptoms: "2 weeks".into(),
            possible_non_diagnostic_causes: vec!["Skin barrier changes".into()],
            general_advice: vec!["Keep the area clean and moisturized.".into()],
            disclaimer: DISCLAIMER.into(),
        }
    }

    #[test]
    fn full_report_renders_all_seven_sections() {
        let sections = layout(&full_report(), Locale::En);
        assert_eq!(sections.len(), 7);
        assert_eq!(sections[0].kind, SectionKind::Summary);
        assert_eq!(sections[6].kind, SectionKind::GeneralAdvice);
    }

    #[test]
    fn empty_fields_suppress_exactly_their_sections() {
        let mut report = full_report();
        report.general_advice.clear();
        report.duration_of_symptoms = String::new();

        let sections = layout(&report, Locale::En);
        let kinds: Vec<SectionKind> = sections.iter().map(|s| s.kind).collect();
        assert_eq!(sections.len(), 5);
        assert!(!kinds.contains(&SectionKind::GeneralAdvice));
        assert!(!kinds.contains(&SectionKind::DurationOfSymptoms));
        assert!(kinds.contains(&SectionKind::Summary));
        assert!(kinds.contains(&SectionKind::PossibleCauses));
    }

    #[test]
    fn summary_only_report_has_one_section() {
        let report = Report::summary_only("A short observation.".into());
        let sections = layout(&report, Locale::En);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].kind, SectionKind::Summary);
        assert_eq!(sections[0].body, SectionBody::Text("A short observation.".into()));
    }

    #[test]
    fn whitespace_only_summary_is_suppressed() {
        let report = Report::summary_only("   ".into());
        assert!(layout(&report, Locale::En).is_empty());
        // The disclaimer still exists on the report itself.
        assert_eq!(report.disclaimer, DISCLAIMER);
    }

    #[test]
    fn titles_follow_locale() {
        let sections_en = layout(&full_report(), Locale::En);
        let sections_ko = layout(&full_report(), Locale::Ko);
        assert_eq!(sections_en[0].title, "Summary");
        assert_eq!(sections_ko[0].title, "요약");
    }

    #[test]
    fn possible_causes_carries_the_note() {
        let sections = layout(&full_report(), Locale::En);
        let causes = sections
            .iter()
            .find(|s| s.kind == SectionKind::PossibleCauses)
            .unwrap();
        assert_eq!(causes.note, Some("These are examples only — not a diagnosis."));
    }

    #[test]
    fn section_serialization_shape() {
        let sections = layout(&full_report(), Locale::En);
        let json = serde_json::to_value(&sections).unwrap();
        assert_eq!(json[0]["kind"], "summary");
        assert!(json[0]["body"].is_string());
        assert_eq!(json[1]["kind"], "visual_observations");
        assert!(json[1]["body"].is_array());
        assert!(json[0].get("note").is_none());
    }
}

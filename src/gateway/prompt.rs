//! Observation prompt construction.
//!
//! The instruction block is fixed: observation only, no diagnosis, a
//! mandatory uncertainty line, 4-6 sentence output. The medication
//! list is rendered with localized labels per the selected locale.

use crate::i18n::{strings, Locale};
use crate::models::{medication::split_free_text, Medication, MedicationInput, MedicationTime, MedicationType};

pub const OBSERVATION_INSTRUCTIONS: &str = "\
You do not make medical diagnoses.
Objectively observe the visual features visible in the photo and summarize them.
Never assert a disease name, judge the condition, or recommend treatments or medications.
Mention the user's medication record only as factual context.
Always include one line on uncertainty (lighting or image quality).
Write the output as 4-6 short sentences.";

/// Render the user's medication record as prompt lines.
pub fn medication_block(input: &MedicationInput, locale: Locale) -> String {
    let labels = &strings(locale).medication;
    match input {
        MedicationInput::Structured(meds) => {
            let counted: Vec<&Medication> = meds.iter().filter(|m| m.is_counted()).collect();
            if counted.is_empty() {
                return labels.none_entered.to_string();
            }
            counted
                .iter()
                .map(|med| {
                    let time = match med.time {
                        MedicationTime::Morning => labels.morning,
                        MedicationTime::Evening => labels.evening,
                    };
                    let kind = match med.kind {
                        MedicationType::Oral => labels.oral,
                        MedicationType::Topical => labels.topical,
                    };
                    format!("- {} ({time}, {kind})", med.name)
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
        MedicationInput::FreeText(text) => {
            let names = split_free_text(text);
            if names.is_empty() {
                return labels.none_entered.to_string();
            }
            names
                .iter()
                .map(|name| format!("- {name}"))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

/// The complete prompt sent alongside the image.
pub fn build_observation_prompt(medications: &MedicationInput, locale: Locale) -> String {
    format!(
        "{OBSERVATION_INSTRUCTIONS}\n\nUser medication record:\n{}\n\nWrite an observation summary based on the photo.",
        medication_block(medications, locale)
    )
}

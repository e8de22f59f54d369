//! Localization layer — immutable string tables for the two supported
//! locales, selected once per render context.
//!
//! Locale choice affects display strings and the prompt's medication
//! labels only, never the wire contracts. The persistence key matches
//! the browser client so both sides agree on where the choice lives.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed key under which the client persists the chosen locale.
pub const LOCALE_STORAGE_KEY: &str = "atop-locale";

pub const DEFAULT_LOCALE: Locale = Locale::En;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ko,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ko => "ko",
        }
    }

    /// Parse a locale tag; unknown tags fall back to the default.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "ko" => Self::Ko,
            _ => DEFAULT_LOCALE,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────
// String tables
// ─────────────────────────────────────────────

pub struct Strings {
    pub intake: IntakeStrings,
    pub report: ReportStrings,
    pub medication: MedicationStrings,
    pub status: StatusStrings,
}

pub struct IntakeStrings {
    pub title: &'static str,
    pub file_too_large: &'static str,
    pub unsupported_format: &'static str,
    pub error_no_photo: &'static str,
    pub disclaimer: &'static str,
}

pub struct ReportStrings {
    pub not_found: &'static str,
    pub loading: &'static str,
    pub summary: &'static str,
    pub visual_observations: &'static str,
    pub user_reported_symptoms: &'static str,
    pub current_medications: &'static str,
    pub duration_of_symptoms: &'static str,
    pub possible_causes: &'static str,
    pub possible_causes_note: &'static str,
    pub general_advice: &'static str,
}

/// Labels used when rendering the medication list into the model prompt.
pub struct MedicationStrings {
    pub none_entered: &'static str,
    pub morning: &'static str,
    pub evening: &'static str,
    pub oral: &'static str,
    pub topical: &'static str,
}

pub struct StatusStrings {
    pub took_pill: &'static str,
    pub applied_ointment: &'static str,
    pub menstrual_cycle: &'static str,
}

static EN: Strings = Strings {
    intake: IntakeStrings {
        title: "Skin Observation Report",
        file_too_large: "File size exceeds 10 MB. Please choose a smaller file.",
        unsupported_format: "Unsupported image format.",
        error_no_photo: "Please upload a skin photo first.",
        disclaimer: "This report is not medical advice. It provides a preliminary visual \
analysis only. Always consult a healthcare provider.",
    },
    report: ReportStrings {
        not_found: "Report not found or expired.",
        loading: "Loading report...",
        summary: "Summary",
        visual_observations: "Visual Observations",
        user_reported_symptoms: "User-Reported Symptoms",
        current_medications: "Current Medications",
        duration_of_symptoms: "Duration of Symptoms",
        possible_causes: "Possible Non-Diagnostic Causes",
        possible_causes_note: "These are examples only — not a diagnosis.",
        general_advice: "General Advice",
    },
    medication: MedicationStrings {
        none_entered: "No medication information provided",
        morning: "morning",
        evening: "evening",
        oral: "oral medication",
        topical: "topical product",
    },
    status: StatusStrings {
        took_pill: "Took Prescribed Pill",
        applied_ointment: "Applied Ointment",
        menstrual_cycle: "Menstrual Cycle (Period)",
    },
};

static KO: Strings = Strings {
    intake: IntakeStrings {
        title: "피부 관찰 리포트",
        file_too_large: "파일 크기가 10MB를 초과합니다. 더 작은 파일을 선택해주세요.",
        unsupported_format: "지원하지 않는 이미지 형식입니다.",
        error_no_photo: "먼저 피부 사진을 업로드해주세요.",
        disclaimer: "이 리포트는 의학적 조언이 아닙니다. 예비 시각 분석만 제공합니다. \
반드시 의료 전문가와 상담하세요.",
    },
    report: ReportStrings {
        not_found: "리포트를 찾을 수 없거나 만료되었습니다.",
        loading: "리포트 불러오는 중...",
        summary: "요약",
        visual_observations: "시각적 관찰",
        user_reported_symptoms: "사용자 보고 증상",
        current_medications: "현재 복용 약물",
        duration_of_symptoms: "증상 지속 기간",
        possible_causes: "비진단적 가능 원인",
        possible_causes_note: "이것은 예시일 뿐이며 진단이 아닙니다.",
        general_advice: "일반적인 조언",
    },
    medication: MedicationStrings {
        none_entered: "입력된 약 정보 없음",
        morning: "아침",
        evening: "저녁",
        oral: "먹는 약",
        topical: "바르는 약",
    },
    status: StatusStrings {
        took_pill: "처방약 복용 완료",
        applied_ointment: "연고 도포 완료",
        menstrual_cycle: "생리 주기",
    },
};

/// Look up the string table for a locale.
pub fn strings(locale: Locale) -> &'static Strings {
    match locale {
        Locale::En => &EN,
        Locale::Ko => &KO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_tags() {
        assert_eq!(Locale::parse("en"), Locale::En);
        assert_eq!(Locale::parse("ko"), Locale::Ko);
    }

    #[test]
    fn unknown_tag_falls_back_to_default() {
        assert_eq!(Locale::parse("fr"), DEFAULT_LOCALE);
        assert_eq!(Locale::parse(""), Locale::En);
    }

    #[test]
    fn locale_serializes_as_tag() {
        assert_eq!(serde_json::to_string(&Locale::Ko).unwrap(), "\"ko\"");
        assert_eq!(format!("{}", Locale::En), "en");
    }

    #[test]
    fn tables_differ_per_locale() {
        assert_eq!(strings(Locale::En).report.summary, "Summary");
        assert_eq!(strings(Locale::Ko).report.summary, "요약");
        assert_ne!(
            strings(Locale::En).medication.none_entered,
            strings(Locale::Ko).medication.none_entered
        );
    }

    #[test]
    fn storage_key_is_stable() {
        assert_eq!(LOCALE_STORAGE_KEY, "atop-locale");
    }
}

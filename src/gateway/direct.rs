//! Direct strategy — inline multi-modal model call.
//!
//! The image bytes are inlined as base64 next to the instruction
//! prompt. Used when no structured backend exists, so the model's
//! free-text response becomes a summary-only report.

use base64::Engine as _;

use crate::i18n::Locale;
use crate::models::Report;

use super::error::AnalysisError;
use super::model::{InlineImage, ModelClient};
use super::prompt::build_observation_prompt;
use super::{AnalysisOutcome, ImagePayload, IntakeMetadata};

pub struct DirectGateway {
    model: ModelClient,
    locale: Locale,
}

impl DirectGateway {
    pub fn new(model: ModelClient, locale: Locale) -> Self {
        Self { model, locale }
    }

    pub async fn analyze(
        &self,
        image: &ImagePayload,
        metadata: &IntakeMetadata,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let span = tracing::info_span!(
            "direct_analysis",
            model = %self.model.model(),
            image_size = image.bytes.len(),
        );
        let _guard = span.enter();

        let encoded = base64::engine::general_purpose::STANDARD.encode(&image.bytes);
        let prompt = build_observation_prompt(&metadata.medications, self.locale);
        drop(_guard);

        let summary = self
            .model
            .generate(
                &prompt,
                Some(InlineImage {
                    mime: &image.mime,
                    data_base64: &encoded,
                }),
            )
            .await?;

        tracing::info!(summary_len = summary.len(), "Direct analysis complete");

        Ok(AnalysisOutcome {
            report: Report::summary_only(summary),
            image_reference: None,
        })
    }
}

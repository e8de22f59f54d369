//! Vision summarization against a fetched image URL.
//!
//! Shared by the staged gateway strategy and the vision endpoint: the
//! image is fetched, its content type checked, the bytes inlined as
//! base64, and the observation prompt sent to the model. The content
//! type gate fires before any model call is made.

use base64::Engine as _;

use crate::i18n::Locale;
use crate::models::MedicationInput;

use super::error::AnalysisError;
use super::model::{InlineImage, ModelClient};
use super::prompt::build_observation_prompt;

const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Fetch `image_url`, verify it is an image, and produce an
/// observation summary for it.
pub async fn summarize_image_url(
    http: &reqwest::Client,
    model: &ModelClient,
    image_url: &str,
    medications: &MedicationInput,
    locale: Locale,
) -> Result<String, AnalysisError> {
    let response = http
        .get(image_url)
        .send()
        .await
        .map_err(|e| AnalysisError::Transport(format!("Could not fetch the image URL: {e}")))?;

    if !response.status().is_success() {
        return Err(AnalysisError::BadInput(
            "The image URL could not be loaded.".into(),
        ));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_IMAGE_MIME)
        .to_string();

    if !content_type.starts_with("image/") {
        return Err(AnalysisError::BadInput(
            "The URL does not point to a valid image type.".into(),
        ));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| AnalysisError::Transport(format!("Could not read the image body: {e}")))?;

    let span = tracing::info_span!(
        "vision_summary",
        model = %model.model(),
        image_size = bytes.len(),
    );
    let _guard = span.enter();

    let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
    let prompt = build_observation_prompt(medications, locale);

    let image = InlineImage {
        mime: &content_type,
        data_base64: &encoded,
    };
    drop(_guard);

    let summary = model.generate(&prompt, Some(image)).await?;
    tracing::info!(summary_len = summary.len(), "Vision summary generated");
    Ok(summary)
}

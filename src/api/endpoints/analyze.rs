//! Analysis submission endpoint.
//!
//! `POST /api/analyze` with multipart fields `file`, `medications`,
//! `symptoms` (comma-joined), `duration`. Validation happens before
//! the gateway is touched; on success the report is stored under a
//! freshly generated identifier and returned with it.

use axum::extract::{Multipart, State};
use axum::Json;
use base64::Engine as _;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::gateway::{ImagePayload, IntakeMetadata};
use crate::intake::{validate, IntakeError};
use crate::models::{medication::split_free_text, MedicationInput, Report};
use crate::store::{generate_report_id, ReportStore};

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub report_id: String,
    #[serde(flatten)]
    pub report: Report,
}

/// `POST /api/analyze` — run the configured analysis strategy.
pub async fn submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let form = parse_form(multipart).await?;
    let Some(file) = form.file else {
        return Err(IntakeError::MissingFile.into());
    };

    let validated = validate(
        &file.name,
        file.content_type.as_deref(),
        file.bytes.len(),
    )?;

    let image = ImagePayload {
        bytes: file.bytes,
        mime: validated.mime,
        file_name: validated.file_name,
    };
    let metadata = IntakeMetadata {
        medications: MedicationInput::parse(&form.medications),
        symptoms: split_free_text(&form.symptoms),
        duration: form.duration.trim().to_string(),
    };

    tracing::info!(
        strategy = %state.gateway.strategy(),
        file = %image.file_name,
        size = image.bytes.len(),
        symptoms = metadata.symptoms.len(),
        "Analysis submitted"
    );

    let outcome = state
        .gateway
        .analyze(&image, &metadata)
        .await
        .map_err(|e| ApiError::from_analysis(e, state.gateway.strategy()))?;

    // The stored image payload: the public reference when a strategy
    // produced one, otherwise a data URL of the submitted bytes.
    let stored_image = outcome.image_reference.clone().unwrap_or_else(|| {
        format!(
            "data:{};base64,{}",
            image.mime,
            base64::engine::general_purpose::STANDARD.encode(&image.bytes)
        )
    });

    let report_id = generate_report_id();
    state
        .store
        .put(&report_id, &outcome.report, Some(&stored_image))?;

    tracing::info!(report_id = %report_id, "Report stored");

    Ok(Json(AnalyzeResponse {
        report_id,
        report: outcome.report,
    }))
}

struct SubmittedFile {
    name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

#[derive(Default)]
struct SubmittedForm {
    file: Option<SubmittedFile>,
    medications: String,
    symptoms: String,
    duration: String,
}

async fn parse_form(mut multipart: Multipart) -> Result<SubmittedForm, ApiError> {
    let mut form = SubmittedForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Could not read the file: {e}")))?;
                form.file = Some(SubmittedFile {
                    name: file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "medications" => form.medications = read_text(field).await?,
            "symptoms" => form.symptoms = read_text(field).await?,
            "duration" => form.duration = read_text(field).await?,
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed form field: {e}")))
}

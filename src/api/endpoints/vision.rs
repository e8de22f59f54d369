//! Vision summary endpoint.
//!
//! `POST /api/vision` with `{imageUrl, medications}`. The image is
//! fetched and content-type checked before any model call; the
//! response carries the observation summary alone.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::gateway::vision::summarize_image_url;
use crate::models::{Medication, MedicationInput};

#[derive(Deserialize)]
pub struct VisionRequest {
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub medications: Vec<Medication>,
}

#[derive(Serialize)]
pub struct VisionResponse {
    pub summary: String,
}

/// `POST /api/vision` — summarize a stored image by URL.
pub async fn summarize(
    State(state): State<AppState>,
    Json(request): Json<VisionRequest>,
) -> Result<Json<VisionResponse>, ApiError> {
    let Some(image_url) = request.image_url.filter(|u| !u.trim().is_empty()) else {
        return Err(ApiError::BadRequest("An image URL is required.".into()));
    };

    let model = state.model.as_ref().ok_or_else(|| {
        ApiError::Internal("The model is not configured; set GEMINI_API_KEY".into())
    })?;

    let medications = MedicationInput::Structured(
        request
            .medications
            .into_iter()
            .filter(Medication::is_counted)
            .collect(),
    );

    let summary = summarize_image_url(&state.http, model, &image_url, &medications, state.locale)
        .await
        .map_err(|e| ApiError::from_analysis(e, state.gateway.strategy()))?;

    Ok(Json(VisionResponse { summary }))
}

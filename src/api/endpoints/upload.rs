//! Object storage upload endpoint.
//!
//! `POST /api/upload` with a multipart `file` field. The allow-list is
//! the same one intake uses; a rejected file never reaches storage.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::intake::{validate, IntakeError};

#[derive(Serialize)]
pub struct UploadResponse {
    #[serde(rename = "publicUrl")]
    pub public_url: String,
}

/// `POST /api/upload` — stage an image in object storage.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Could not read the file: {e}")))?;
            file = Some((name, content_type, bytes.to_vec()));
        }
    }

    let Some((name, content_type, bytes)) = file else {
        return Err(IntakeError::MissingFile.into());
    };

    let validated = validate(&name, content_type.as_deref(), bytes.len())?;

    let storage = state.storage.as_ref().ok_or_else(|| {
        ApiError::Internal(
            "Object storage is not configured; set SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY"
                .into(),
        )
    })?;

    let path = crate::gateway::storage::object_path(&validated.extension);
    tracing::info!(path = %path, size = bytes.len(), "Uploading to object storage");

    let public_url = storage
        .upload(&path, &validated.mime, bytes)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(UploadResponse { public_url }))
}

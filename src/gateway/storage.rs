//! Object storage client (Supabase-style storage REST API).
//!
//! Uploads land under a freshly randomized path scoped to the
//! `uploads/` prefix; the public URL is derived from the same path.

use uuid::Uuid;

use super::error::AnalysisError;

pub const DEFAULT_BUCKET: &str = "skin-images";

/// Prefix under which all uploaded photos live.
pub const UPLOAD_PREFIX: &str = "uploads";

const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Clone)]
pub struct ObjectStoreClient {
    base_url: String,
    service_key: String,
    bucket: String,
    http: reqwest::Client,
}

impl ObjectStoreClient {
    pub fn new(base_url: &str, service_key: &str, bucket: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
            bucket: bucket.to_string(),
            http,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Public URL for an object path in this bucket.
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{path}",
            self.base_url, self.bucket
        )
    }

    /// Upload bytes under `path` and return the public URL.
    ///
    /// No compensating delete exists — when a later pipeline stage
    /// fails, the object stays behind.
    pub async fn upload(
        &self,
        path: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AnalysisError> {
        let url = format!("{}/storage/v1/object/{}/{path}", self.base_url, self.bucket);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header("x-upsert", "false")
            .header(reqwest::header::CONTENT_TYPE, mime)
            .body(bytes)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    AnalysisError::Transport(format!(
                        "Cannot reach the storage service at {}",
                        self.base_url
                    ))
                } else {
                    AnalysisError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Upstream {
                status: status.as_u16(),
                message: format!("Storage upload failed: {}", storage_error_message(&body)),
            });
        }

        Ok(self.public_url(path))
    }
}

/// Randomized object path under the uploads prefix. An empty extension
/// falls back to `jpg`.
pub fn object_path(extension: &str) -> String {
    let ext = if extension.is_empty() { "jpg" } else { extension };
    format!("{UPLOAD_PREFIX}/{}.{ext}", Uuid::new_v4())
}

fn storage_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(message) = value[key].as_str() {
                return message.to_string();
            }
        }
    }
    if body.trim().is_empty() {
        "storage error".to_string()
    } else {
        body.trim().to_string()
    }
}

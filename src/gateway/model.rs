//! Generative model HTTP client.
//!
//! Talks to a Gemini-style `generateContent` REST endpoint. Connection
//! failures, timeouts, non-success statuses, and unreadable bodies map
//! onto the analysis error taxonomy; an empty model response falls
//! back to a fixed placeholder summary rather than failing the call.

use serde::{Deserialize, Serialize};

use super::error::AnalysisError;

pub const DEFAULT_MODEL_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Returned when the model produced no usable text.
pub const FALLBACK_SUMMARY: &str = "A summary could not be generated.";

const REQUEST_TIMEOUT_SECS: u64 = 120;

/// An inline image part, already base64-encoded.
pub struct InlineImage<'a> {
    pub mime: &'a str,
    pub data_base64: &'a str,
}

#[derive(Clone)]
pub struct ModelClient {
    base_url: String,
    api_key: String,
    model: String,
    http: reqwest::Client,
}

impl ModelClient {
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            http,
        }
    }

    /// Client against the hosted endpoint with the default model.
    pub fn with_default_endpoint(api_key: &str) -> Self {
        Self::new(DEFAULT_MODEL_BASE_URL, api_key, DEFAULT_MODEL)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a prompt (and optionally an inline image) to the model and
    /// return its text response. Single attempt, no retries.
    pub async fn generate(
        &self,
        prompt: &str,
        image: Option<InlineImage<'_>>,
    ) -> Result<String, AnalysisError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let mut parts = vec![Part::Text {
            text: prompt.to_string(),
        }];
        if let Some(image) = image {
            parts.push(Part::Inline {
                inline_data: InlineData {
                    mime_type: image.mime.to_string(),
                    data: image.data_base64.to_string(),
                },
            });
        }

        let body = GenerateContentRequest {
            contents: vec![Content { parts }],
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    AnalysisError::Transport(format!(
                        "Cannot reach the model endpoint at {}",
                        self.base_url
                    ))
                } else if e.is_timeout() {
                    AnalysisError::Transport(format!(
                        "Model request timed out after {REQUEST_TIMEOUT_SECS}s"
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
                message: extract_error_message(&body),
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|_| AnalysisError::BadInput("The model returned an unreadable response.".into()))?;

        let text = parsed.first_text().map(|t| t.trim().to_string());
        Ok(match text {
            Some(text) if !text.is_empty() => text,
            _ => FALLBACK_SUMMARY.to_string(),
        })
    }
}

/// Pull a human-readable message out of an upstream error body.
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value["error"]["message"].as_str() {
            return message.to_string();
        }
    }
    if body.trim().is_empty() {
        "Model request failed".to_string()
    } else {
        body.trim().to_string()
    }
}

// ─────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|p| p.text.as_deref())
    }
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

//! Delegated strategy — forward the full form to an independent
//! analysis service.
//!
//! The multipart form (image + medications text + symptoms text +
//! duration text) goes to the backend verbatim; its JSON response is
//! the full structured report. An unreadable body is treated as an
//! empty object and surfaced as bad input.

use crate::models::Report;

use super::error::AnalysisError;
use super::{AnalysisOutcome, ImagePayload, IntakeMetadata};

const REQUEST_TIMEOUT_SECS: u64 = 180;

pub struct DelegatedGateway {
    backend_url: String,
    http: reqwest::Client,
}

impl DelegatedGateway {
    pub fn new(backend_url: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub async fn analyze(
        &self,
        image: &ImagePayload,
        metadata: &IntakeMetadata,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let url = format!("{}/api/analyze", self.backend_url);

        let file_part = reqwest::multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)
            .map_err(|e| AnalysisError::BadInput(format!("Invalid image content type: {e}")))?;

        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("medications", metadata.medications.as_form_text())
            .text("symptoms", metadata.symptoms_text())
            .text("duration", metadata.duration.clone());

        tracing::info!(url = %url, "Forwarding analysis request to backend");

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    AnalysisError::Transport("Analysis request failed".into())
                } else if e.is_timeout() {
                    AnalysisError::Transport(format!(
                        "Analysis request timed out after {REQUEST_TIMEOUT_SECS}s"
                    ))
                } else {
                    AnalysisError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        // Unreadable JSON reads as an empty object.
        let value: serde_json::Value =
            serde_json::from_str(&body).unwrap_or(serde_json::Value::Object(Default::default()));

        if !status.is_success() {
            let message = value["detail"]
                .as_str()
                .or_else(|| value["error"].as_str())
                .unwrap_or("Analysis failed")
                .to_string();
            return Err(AnalysisError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        if value.as_object().map(|o| o.is_empty()).unwrap_or(true) {
            return Err(AnalysisError::BadInput(
                "The analysis service returned an unreadable response.".into(),
            ));
        }

        let report: Report = serde_json::from_value(value).map_err(|_| {
            AnalysisError::BadInput("The analysis service returned an unreadable response.".into())
        })?;

        tracing::info!(
            observations = report.visual_observations.len(),
            symptoms = report.user_reported_symptoms.len(),
            "Delegated analysis complete"
        );

        Ok(AnalysisOutcome {
            report,
            image_reference: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MedicationInput;
    use axum::extract::Multipart;
    use axum::routing::post;
    use axum::{Json, Router};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn payload() -> ImagePayload {
        ImagePayload {
            bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
            mime: "image/jpeg".into(),
            file_name: "skin.jpg".into(),
        }
    }

    fn metadata() -> IntakeMetadata {
        IntakeMetadata {
            medications: MedicationInput::FreeText("Moisturizer, antihistamine".into()),
            symptoms: vec!["itching".into(), "redness".into(), "flareup".into()],
            duration: "2 weeks".into(),
        }
    }

    fn full_report_json() -> serde_json::Value {
        serde_json::json!({
            "summary": "Visual observations may be consistent with the described areas.",
            "visual_observations": ["dry patches"],
            "user_reported_symptoms": ["itching", "redness", "flareup"],
            "current_medications": ["Moisturizer", "antihistamine"],
            "duration_of_symptoms": "2 weeks",
            "possible_non_diagnostic_causes": ["Skin barrier changes"],
            "general_advice": ["Keep the area clean and moisturized."],
            "disclaimer": "This is not medical advice."
        })
    }

    /// Echo backend that asserts the multipart fields arrive verbatim.
    fn verifying_backend() -> Router {
        Router::new().route(
            "/api/analyze",
            post(|mut multipart: Multipart| async move {
                let mut fields = std::collections::HashMap::new();
                let mut file_len = 0usize;
                while let Some(field) = multipart.next_field().await.unwrap() {
                    let name = field.name().unwrap_or_default().to_string();
                    if name == "file" {
                        file_len = field.bytes().await.unwrap().len();
                    } else {
                        fields.insert(name, field.text().await.unwrap());
                    }
                }
                assert_eq!(file_len, 4);
                assert_eq!(fields["medications"], "Moisturizer, antihistamine");
                assert_eq!(fields["symptoms"], "itching, redness, flareup");
                assert_eq!(fields["duration"], "2 weeks");
                Json(full_report_json())
            }),
        )
    }

    #[tokio::test]
    async fn forwards_form_and_parses_full_report() {
        let base = serve(verifying_backend()).await;
        let gateway = DelegatedGateway::new(&base);

        let outcome = gateway.analyze(&payload(), &metadata()).await.unwrap();
        let report = outcome.report;
        assert_eq!(
            report.user_reported_symptoms,
            vec!["itching", "redness", "flareup"]
        );
        assert_eq!(report.current_medications, vec!["Moisturizer", "antihistamine"]);
        assert_eq!(report.duration_of_symptoms, "2 weeks");
        assert!(outcome.image_reference.is_none());
    }

    #[tokio::test]
    async fn missing_array_fields_deserialize_to_empty() {
        let app = Router::new().route(
            "/api/analyze",
            post(|| async {
                Json(serde_json::json!({
                    "summary": "ok",
                    "user_reported_symptoms": ["itching"]
                }))
            }),
        );
        let base = serve(app).await;

        let outcome = DelegatedGateway::new(&base)
            .analyze(&payload(), &metadata())
            .await
            .unwrap();
        assert!(outcome.report.general_advice.is_empty());
        assert!(outcome.report.visual_observations.is_empty());
        assert_eq!(outcome.report.user_reported_symptoms, vec!["itching"]);
    }

    #[tokio::test]
    async fn backend_error_detail_is_surfaced() {
        let app = Router::new().route(
            "/api/analyze",
            post(|| async {
                (
                    axum::http::StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({"detail": "Please upload an image file"})),
                )
            }),
        );
        let base = serve(app).await;

        let err = DelegatedGateway::new(&base)
            .analyze(&payload(), &metadata())
            .await
            .unwrap_err();
        match err {
            AnalysisError::Upstream { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Please upload an image file");
            }
            other => panic!("Expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_without_body_gets_generic_message() {
        let app = Router::new().route(
            "/api/analyze",
            post(|| async { axum::http::StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base = serve(app).await;

        let err = DelegatedGateway::new(&base)
            .analyze(&payload(), &metadata())
            .await
            .unwrap_err();
        match err {
            AnalysisError::Upstream { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Analysis failed");
            }
            other => panic!("Expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_success_body_is_bad_input() {
        let app = Router::new().route(
            "/api/analyze",
            post(|| async { "this is not json" }),
        );
        let base = serve(app).await;

        let err = DelegatedGateway::new(&base)
            .analyze(&payload(), &metadata())
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::BadInput(_)), "{err:?}");
    }

    #[tokio::test]
    async fn unreachable_backend_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = DelegatedGateway::new(&format!("http://{addr}"))
            .analyze(&payload(), &metadata())
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Transport(_)));
    }
}

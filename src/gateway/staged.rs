//! Store-then-analyze strategy.
//!
//! The image is first uploaded to object storage under a randomized
//! `uploads/` path; the resulting public reference is then summarized
//! by the vision model. A failed model call after a successful upload
//! leaves the object behind — logged so an operator can reap it.

use crate::i18n::Locale;
use crate::models::Report;

use super::error::AnalysisError;
use super::model::ModelClient;
use super::storage::{object_path, ObjectStoreClient};
use super::vision::summarize_image_url;
use super::{AnalysisOutcome, ImagePayload, IntakeMetadata};

pub struct StagedGateway {
    storage: ObjectStoreClient,
    model: ModelClient,
    http: reqwest::Client,
    locale: Locale,
}

impl StagedGateway {
    pub fn new(storage: ObjectStoreClient, model: ModelClient, locale: Locale) -> Self {
        Self {
            storage,
            model,
            http: reqwest::Client::new(),
            locale,
        }
    }

    pub async fn analyze(
        &self,
        image: &ImagePayload,
        metadata: &IntakeMetadata,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let path = object_path(&image.extension());
        tracing::info!(path = %path, bucket = %self.storage.bucket(), "Uploading image for analysis");

        let public_url = self
            .storage
            .upload(&path, &image.mime, image.bytes.clone())
            .await?;

        let summary = match summarize_image_url(
            &self.http,
            &self.model,
            &public_url,
            &metadata.medications,
            self.locale,
        )
        .await
        {
            Ok(summary) => summary,
            Err(e) => {
                // The uploaded object has no compensating delete.
                tracing::warn!(path = %path, error = %e, "Analysis failed after upload; stored object orphaned");
                return Err(e);
            }
        };

        Ok(AnalysisOutcome {
            report: Report::summary_only(summary),
            image_reference: Some(public_url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MedicationInput;
    use axum::extract::Path;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

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
            bytes: vec![0xFF, 0xD8, 0xFF],
            mime: "image/jpeg".into(),
            file_name: "skin.jpg".into(),
        }
    }

    fn metadata() -> IntakeMetadata {
        IntakeMetadata {
            medications: MedicationInput::FreeText("antihistamine".into()),
            symptoms: vec![],
            duration: String::new(),
        }
    }

    /// One mock server acting as object store, public file host, and model.
    fn upstream(uploads: Arc<AtomicUsize>) -> Router {
        Router::new()
            .route(
                "/storage/v1/object/skin-images/uploads/:name",
                post(move |Path(name): Path<String>| {
                    uploads.fetch_add(1, Ordering::SeqCst);
                    async move { Json(serde_json::json!({"Key": name})) }
                }),
            )
            .route(
                "/storage/v1/object/public/skin-images/uploads/:name",
                get(|| async { ([("content-type", "image/jpeg")], b"\xFF\xD8".to_vec()) }),
            )
            .route(
                "/v1beta/models/test-model:generateContent",
                post(|| async {
                    Json(serde_json::json!({
                        "candidates": [{"content": {"parts": [{"text": "Patchy redness observed."}]}}]
                    }))
                }),
            )
    }

    #[tokio::test]
    async fn uploads_then_summarizes_public_url() {
        let uploads = Arc::new(AtomicUsize::new(0));
        let base = serve(upstream(uploads.clone())).await;

        let gateway = StagedGateway::new(
            ObjectStoreClient::new(&base, "service-key", "skin-images"),
            ModelClient::new(&base, "key", "test-model"),
            Locale::En,
        );

        let outcome = gateway.analyze(&payload(), &metadata()).await.unwrap();
        assert_eq!(uploads.load(Ordering::SeqCst), 1);
        assert_eq!(outcome.report.summary, "Patchy redness observed.");
        let reference = outcome.image_reference.expect("public URL expected");
        assert!(reference.contains("/storage/v1/object/public/skin-images/uploads/"));
        assert!(reference.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn upload_failure_short_circuits() {
        let app = Router::new().route(
            "/storage/v1/object/skin-images/uploads/:name",
            post(|| async {
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"message": "disk full"})),
                )
            }),
        );
        let base = serve(app).await;

        let gateway = StagedGateway::new(
            ObjectStoreClient::new(&base, "service-key", "skin-images"),
            ModelClient::new(&base, "key", "test-model"),
            Locale::En,
        );

        let err = gateway.analyze(&payload(), &metadata()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Upstream { status: 500, .. }));
    }

    #[tokio::test]
    async fn model_failure_after_upload_propagates() {
        let uploads = Arc::new(AtomicUsize::new(0));
        let uploads_in = uploads.clone();
        let app = Router::new()
            .route(
                "/storage/v1/object/skin-images/uploads/:name",
                post(move |Path(name): Path<String>| {
                    uploads_in.fetch_add(1, Ordering::SeqCst);
                    async move { Json(serde_json::json!({"Key": name})) }
                }),
            )
            .route(
                "/storage/v1/object/public/skin-images/uploads/:name",
                get(|| async { ([("content-type", "image/jpeg")], b"\xFF\xD8".to_vec()) }),
            )
            .route(
                "/v1beta/models/test-model:generateContent",
                post(|| async {
                    (
                        axum::http::StatusCode::BAD_GATEWAY,
                        Json(serde_json::json!({"error": {"message": "backend exploded"}})),
                    )
                }),
            );
        let base = serve(app).await;

        let gateway = StagedGateway::new(
            ObjectStoreClient::new(&base, "service-key", "skin-images"),
            ModelClient::new(&base, "key", "test-model"),
            Locale::En,
        );

        let err = gateway.analyze(&payload(), &metadata()).await.unwrap_err();
        // The upload happened; the stored object stays behind.
        assert_eq!(uploads.load(Ordering::SeqCst), 1);
        assert!(matches!(err, AnalysisError::Upstream { status: 502, .. }));
    }
}

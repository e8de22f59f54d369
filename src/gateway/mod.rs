//! Analysis gateway — the boundary that turns a validated image plus
//! intake metadata into a report.
//!
//! The gateway is polymorphic over three strategies selected by
//! deployment configuration, not by the caller: a direct multi-modal
//! model call, store-then-analyze against object storage, and a
//! delegated backend service. All three satisfy one contract:
//! `analyze(image, metadata) -> Result<AnalysisOutcome, AnalysisError>`.

pub mod delegated;
pub mod direct;
pub mod error;
pub mod model;
pub mod prompt;
pub mod staged;
pub mod storage;
pub mod vision;

pub use delegated::DelegatedGateway;
pub use direct::DirectGateway;
pub use error::{AnalysisError, BACKEND_HINT};
pub use model::{InlineImage, ModelClient};
pub use staged::StagedGateway;
pub use storage::ObjectStoreClient;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::intake::validate::extension_of;
use crate::models::{MedicationInput, Report};

/// A validated image ready for analysis.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub file_name: String,
}

impl ImagePayload {
    /// Extension used for storage paths; defaults to `jpg`.
    pub fn extension(&self) -> String {
        extension_of(&self.file_name).unwrap_or_else(|| "jpg".to_string())
    }
}

/// Structured metadata accompanying the image.
#[derive(Debug, Clone)]
pub struct IntakeMetadata {
    pub medications: MedicationInput,
    pub symptoms: Vec<String>,
    pub duration: String,
}

impl IntakeMetadata {
    /// Comma-joined symptoms for the wire, insertion order preserved.
    pub fn symptoms_text(&self) -> String {
        self.symptoms.join(", ")
    }
}

/// A successful analysis: the report plus the reference to the image
/// it was produced from, when one exists.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub report: Report,
    pub image_reference: Option<String>,
}

/// Deployment-selected analysis strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Direct,
    Staged,
    Delegated,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Staged => "staged",
            Self::Delegated => "delegated",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "direct" => Some(Self::Direct),
            "staged" => Some(Self::Staged),
            "delegated" => Some(Self::Delegated),
            _ => None,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The configured gateway. Exactly one strategy per deployment.
pub enum Gateway {
    Direct(DirectGateway),
    Staged(StagedGateway),
    Delegated(DelegatedGateway),
}

impl Gateway {
    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Direct(_) => Strategy::Direct,
            Self::Staged(_) => Strategy::Staged,
            Self::Delegated(_) => Strategy::Delegated,
        }
    }

    /// Run the configured strategy. Precondition: the image has passed
    /// intake validation. Single attempt — a failure is surfaced
    /// immediately.
    pub async fn analyze(
        &self,
        image: &ImagePayload,
        metadata: &IntakeMetadata,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        match self {
            Self::Direct(gateway) => gateway.analyze(image, metadata).await,
            Self::Staged(gateway) => gateway.analyze(image, metadata).await,
            Self::Delegated(gateway) => gateway.analyze(image, metadata).await,
        }
    }
}

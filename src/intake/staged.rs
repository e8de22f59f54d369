//! Pre-staging relay between the entry screen and the intake screen.
//!
//! A file picked on the entry screen is serialized (name, MIME type,
//! base64 data URL) into a single short-lived slot so the intake stage
//! can reconstruct an equivalent payload. Same-session only — taking
//! the payload empties the slot.

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use super::IntakeError;

/// Slot key, shared with the browser client's session storage.
pub const HANDOFF_KEY: &str = "pending-upload";

/// A serialized file waiting to be picked up by the intake stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedUpload {
    pub name: String,
    #[serde(rename = "type")]
    pub mime: String,
    /// `data:<mime>;base64,<payload>` data URL.
    pub data: String,
}

impl StagedUpload {
    pub fn from_bytes(name: &str, mime: &str, bytes: &[u8]) -> Self {
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self {
            name: name.to_string(),
            mime: mime.to_string(),
            data: format!("data:{mime};base64,{encoded}"),
        }
    }

    /// Reconstruct the original bytes from the data URL. A bare base64
    /// payload without the `data:` prefix is also accepted.
    pub fn decode(&self) -> Result<Vec<u8>, IntakeError> {
        let payload = match self.data.split_once(";base64,") {
            Some((_, rest)) => rest,
            None => self.data.as_str(),
        };
        base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| IntakeError::MalformedStagedPayload(e.to_string()))
    }
}

/// Single-entry, take-once relay for the staged upload.
#[derive(Default)]
pub struct HandoffSlot {
    slot: Mutex<Option<String>>,
}

impl HandoffSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a payload, replacing whatever was there before.
    pub fn stage(&self, upload: &StagedUpload) -> Result<(), IntakeError> {
        let json = serde_json::to_string(upload)
            .map_err(|e| IntakeError::MalformedStagedPayload(e.to_string()))?;
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(json);
        }
        Ok(())
    }

    /// Take the staged payload, emptying the slot. A malformed entry
    /// yields `None` — the intake screen simply starts empty.
    pub fn take(&self) -> Option<StagedUpload> {
        let json = self.slot.lock().ok()?.take()?;
        serde_json::from_str(&json).ok()
    }

    pub fn is_staged(&self) -> bool {
        self.slot.lock().map(|s| s.is_some()).unwrap_or(false)
    }
}

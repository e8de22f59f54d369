//! Ephemeral report store — holds generated reports for the lifetime
//! of the session, addressed by a generated identifier.
//!
//! The store is an explicit, injectable key-value abstraction rather
//! than ambient global storage. Two keys exist per report — one for
//! the report body and one for the associated image payload — both
//! namespaced by the same identifier.

pub mod session;
pub mod token;

pub use session::SessionReportStore;
pub use token::generate_report_id;

use crate::models::{Report, ReportHandle};

/// Key prefix for the serialized report body.
pub const REPORT_KEY_PREFIX: &str = "report-";
/// Key prefix for the associated image payload.
pub const IMAGE_KEY_PREFIX: &str = "report-image-";

pub fn report_key(id: &str) -> String {
    format!("{REPORT_KEY_PREFIX}{id}")
}

pub fn image_key(id: &str) -> String {
    format!("{IMAGE_KEY_PREFIX}{id}")
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store lock poisoned")]
    LockPoisoned,
    #[error("Failed to serialize report: {0}")]
    Serialize(String),
}

/// Session-scoped report storage.
///
/// `get` on an absent or malformed entry yields `None` — the renderer
/// treats that as its `NotFound` state. Repeated `get` calls without
/// an intervening `put` return the same result.
pub trait ReportStore: Send + Sync {
    fn put(
        &self,
        id: &str,
        report: &Report,
        image_reference: Option<&str>,
    ) -> Result<(), StoreError>;

    fn get(&self, id: &str) -> Option<ReportHandle>;

    /// The stored image payload for an identifier, if any.
    fn get_image(&self, id: &str) -> Option<String>;
}

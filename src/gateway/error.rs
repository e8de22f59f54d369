//! Analysis error taxonomy.
//!
//! Every failure is terminal for the current attempt — no retries
//! anywhere. The user resubmits.

use super::Strategy;

/// Operator hint appended when the delegated backend is unreachable.
pub const BACKEND_HINT: &str =
    "Ensure the analysis backend is running and BACKEND_URL points at it.";

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Invalid or missing input, caught before or instead of an
    /// upstream call. Also covers unreadable upstream bodies, which
    /// are treated as empty objects.
    #[error("{0}")]
    BadInput(String),

    /// Upstream HTTP call completed with a non-success status.
    #[error("Upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Network or transport failure — the call never completed.
    #[error("{0}")]
    Transport(String),
}

impl AnalysisError {
    /// The message surfaced to the user. For the delegated strategy a
    /// transport failure carries the operator hint, mirroring the
    /// behavior when no backend is reachable.
    pub fn user_message(&self, strategy: Strategy) -> String {
        match self {
            Self::Transport(message) if strategy == Strategy::Delegated => {
                format!("{message}. {BACKEND_HINT}")
            }
            other => other.to_string(),
        }
    }
}

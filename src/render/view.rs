//! Report resolution state machine.
//!
//! `Loading` is entered whenever an identifier is present but not yet
//! resolved. One resolution attempt moves to `Found` or `NotFound`;
//! both are terminal for the mount. A fresh view with a new id
//! restarts the machine — there is no transition back to `Loading`.

use serde::Deserialize;

use crate::models::{medication::split_free_text, Medication, Report, ReportHandle};
use crate::store::ReportStore;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Found(ReportHandle),
    NotFound,
}

impl ViewState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// Optional query-parameter handoff for the alternate no-storage flow.
/// The renderer tolerates the absence of any of these.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub summary: Option<String>,
    /// JSON-encoded medication array; malformed input reads as empty.
    pub medications: Option<String>,
}

impl ReportQuery {
    pub fn is_empty(&self) -> bool {
        self.image_url.is_none() && self.summary.is_none() && self.medications.is_none()
    }

    /// Medication names carried in the query, if any parse.
    pub fn medication_names(&self) -> Vec<String> {
        let Some(raw) = self.medications.as_deref() else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<Medication>>(raw) {
            Ok(meds) => meds
                .into_iter()
                .filter(Medication::is_counted)
                .map(|m| m.name)
                .collect(),
            Err(_) => split_free_text(raw),
        }
    }
}

/// A single mount of the report view.
#[derive(Debug)]
pub struct ReportView {
    id: Option<String>,
    state: ViewState,
}

impl ReportView {
    /// A fresh mount. With an identifier the machine starts in
    /// `Loading`; without one it is `NotFound` immediately.
    pub fn new(id: Option<&str>) -> Self {
        match id {
            Some(id) if !id.is_empty() => Self {
                id: Some(id.to_string()),
                state: ViewState::Loading,
            },
            _ => Self {
                id: None,
                state: ViewState::NotFound,
            },
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Single-attempt resolution: store first, then the query handoff.
    /// A second call on a terminal state is a no-op.
    pub fn resolve(&mut self, store: &dyn ReportStore, query: &ReportQuery) -> &ViewState {
        if self.state.is_terminal() {
            return &self.state;
        }

        let Some(id) = self.id.as_deref() else {
            self.state = ViewState::NotFound;
            return &self.state;
        };

        self.state = match store.get(id) {
            Some(handle) => ViewState::Found(handle),
            None => match synthesize_from_query(id, query) {
                Some(handle) => ViewState::Found(handle),
                None => ViewState::NotFound,
            },
        };
        &self.state
    }
}

/// Build a summary-only handle from the query-parameter handoff.
/// Requires at least a summary or an image reference.
pub fn synthesize_from_query(id: &str, query: &ReportQuery) -> Option<ReportHandle> {
    if query.summary.is_none() && query.image_url.is_none() {
        return None;
    }

    let mut report = Report::summary_only(query.summary.clone().unwrap_or_default());
    report.current_medications = query.medication_names();

    Some(ReportHandle {
        id: id.to_string(),
        report,
        image_reference: query.image_url.clone(),
    })
}

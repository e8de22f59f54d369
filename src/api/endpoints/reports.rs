//! Report read-back endpoint — the renderer's resolution path.
//!
//! `GET /api/reports/:id` resolves the identifier through the view
//! state machine: session store first, then the optional
//! query-parameter handoff. An unresolvable identifier is the
//! terminal `NotFound` state, offered back as 404.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::i18n::{strings, Locale};
use crate::models::Report;
use crate::render::{layout, RenderedSection, ReportQuery, ReportView, ViewState};

#[derive(Deserialize)]
pub struct ReportPageQuery {
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub summary: Option<String>,
    pub medications: Option<String>,
    pub locale: Option<String>,
}

#[derive(Serialize)]
pub struct ReportPageResponse {
    pub report_id: String,
    pub report: Report,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_reference: Option<String>,
    pub sections: Vec<RenderedSection>,
    pub disclaimer: String,
}

/// `GET /api/reports/:id` — resolve and lay out a report.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ReportPageQuery>,
) -> Result<Json<ReportPageResponse>, ApiError> {
    let locale = query
        .locale
        .as_deref()
        .map(Locale::parse)
        .unwrap_or(state.locale);

    let handoff = ReportQuery {
        image_url: query.image_url,
        summary: query.summary,
        medications: query.medications,
    };

    let mut view = ReportView::new(Some(&id));
    match view.resolve(state.store.as_ref(), &handoff) {
        ViewState::Found(handle) => {
            let sections = layout(&handle.report, locale);
            Ok(Json(ReportPageResponse {
                report_id: handle.id.clone(),
                disclaimer: handle.report.disclaimer.clone(),
                image_reference: handle.image_reference.clone(),
                sections,
                report: handle.report.clone(),
            }))
        }
        _ => Err(ApiError::NotFound(
            strings(locale).report.not_found.to_string(),
        )),
    }
}

//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum
//! server. The body limit sits above the intake ceiling so oversized
//! files reach validation and get the size-specific message instead of
//! a bare 413.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::state::AppState;

/// Request body ceiling. Leaves room for multipart framing around a
/// file at the 10 MiB intake limit.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Build the API router.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/api/analyze", post(endpoints::analyze::submit))
        .route("/api/upload", post(endpoints::upload::upload))
        .route("/api/vision", post(endpoints::vision::summarize))
        .route("/api/reports/:id", get(endpoints::reports::show))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

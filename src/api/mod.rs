//! HTTP API — the service's external interfaces.
//!
//! A composable axum `Router` carrying `AppState`, served with a
//! graceful-shutdown handle. Endpoints: analysis submission, object
//! storage upload, vision summary, report read-back, and liveness.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use router::api_router;
pub use server::{start_server, ServerHandle};
pub use state::AppState;

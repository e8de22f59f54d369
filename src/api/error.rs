//! API error type with `{error}` JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::gateway::{AnalysisError, Strategy};
use crate::intake::IntakeError;
use crate::store::StoreError;

/// Error body surfaced to the client, message verbatim.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    /// Upstream status passed through with its extracted message.
    #[error("Upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },
    /// Transport-level failure reaching an upstream.
    #[error("{0}")]
    BadGateway(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Map a gateway failure onto an HTTP response, appending the
    /// operator hint for delegated transport failures.
    pub fn from_analysis(err: AnalysisError, strategy: Strategy) -> Self {
        let message = err.user_message(strategy);
        match err {
            AnalysisError::BadInput(_) => Self::BadRequest(message),
            AnalysisError::Upstream { status, .. } => Self::Upstream { status, message },
            AnalysisError::Transport(_) => Self::BadGateway(message),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Upstream { message, .. } => message.clone(),
            other => other.to_string(),
        };
        if status.is_server_error() {
            tracing::error!(status = %status, message, "API error");
        }
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<IntakeError> for ApiError {
    fn from(err: IntakeError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

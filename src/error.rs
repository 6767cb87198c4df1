//! Error types
//!
//! `PredictError` is the only failure a caller of the orchestrator can see;
//! remote failures are recovered internally. `ApiError` maps it into
//! consistent HTTP error bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Caller input errors. Raised before any network activity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictError {
    #[error("invalid {field}: {reason}")]
    InvalidRequest { field: &'static str, reason: &'static str },
}

impl PredictError {
    pub fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidRequest { field, reason }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An error tagged with the request it belongs to.
    #[error("{error}")]
    Tagged {
        error: Box<ApiError>,
        request_id: String,
    },
}

impl From<PredictError> for ApiError {
    fn from(err: PredictError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ApiError {
    /// Attach the request ID echoed in the error body.
    pub fn with_request_id(self, request_id: Option<String>) -> Self {
        match (self, request_id) {
            (Self::Tagged { error, .. }, Some(request_id)) => Self::Tagged { error, request_id },
            (err, Some(request_id)) => Self::Tagged {
                error: Box::new(err),
                request_id,
            },
            (err, None) => err,
        }
    }

    fn request_id(&self) -> Option<&str> {
        match self {
            Self::Tagged { request_id, .. } => Some(request_id),
            _ => None,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Tagged { error, .. } => error.status_code(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Tagged { error, .. } => error.error_code(),
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::NotFound(msg) | Self::BadRequest(msg) => msg.clone(),
            Self::Tagged { error, .. } => error.public_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, request_id = ?self.request_id(), "API error");

        let status = self.status_code();
        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.public_message(),
            request_id: self.request_id().map(str::to_string),
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

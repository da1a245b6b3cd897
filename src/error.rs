//! Error type shared by the rate services and the HTTP handlers.
//!
//! Row- and record-level parse failures never become a `RateError`; they are
//! dropped where they occur. Only request-level failures surface here.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RateError {
    /// Unknown asset key, or no upstream record for the requested point.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed date, inverted range, range too large.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Transport failure, timeout or non-success status from an upstream.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Upstream answered but the payload has the wrong shape.
    #[error("Upstream format error: {0}")]
    UpstreamFormat(String),
}

impl RateError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RateError::NotFound(_) => StatusCode::NOT_FOUND,
            RateError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            RateError::UpstreamUnavailable(_) | RateError::UpstreamFormat(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl From<reqwest::Error> for RateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RateError::UpstreamUnavailable(format!("request timed out: {}", err))
        } else if err.is_decode() {
            RateError::UpstreamFormat(format!("undecodable body: {}", err))
        } else {
            RateError::UpstreamUnavailable(err.to_string())
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&RateError> for ErrorResponse {
    fn from(err: &RateError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl IntoResponse for RateError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RateError::NotFound("xyz".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RateError::InvalidInput("bad date".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RateError::UpstreamUnavailable("timeout".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            RateError::UpstreamFormat("not an array".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_error_body_carries_message() {
        let body = ErrorResponse::from(&RateError::NotFound("Unknown asset 'xyz'".into()));
        assert_eq!(body.error, "Not found: Unknown asset 'xyz'");
    }
}

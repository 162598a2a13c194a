//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side faults to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use pantry_core::ShopError;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A shop operation failed with a typed domain outcome.
    #[error(transparent)]
    Shop(#[from] ShopError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry_after_ms: Option<i64>,
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Shop(err) => match err {
                ShopError::NotFound(_) => StatusCode::NOT_FOUND,
                ShopError::InvalidQuantity { .. } => StatusCode::BAD_REQUEST,
                ShopError::CooldownActive { .. } => StatusCode::TOO_MANY_REQUESTS,
                ShopError::InsufficientStock(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn retry_after(&self) -> Option<chrono::TimeDelta> {
        match self {
            Self::Shop(ShopError::CooldownActive { remaining, .. }) => Some(*remaining),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // InsufficientStock after validation means serialization broke somewhere;
        // capture it like any other server fault.
        let server_fault = matches!(
            self,
            Self::Internal(_) | Self::Shop(ShopError::InsufficientStock(_))
        );
        if server_fault {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();
        let retry_after = self.retry_after();

        // Don't expose internal error details to clients
        let message = if server_fault {
            "Internal server error".to_owned()
        } else {
            self.to_string()
        };

        let body = Json(ErrorBody {
            error: message,
            retry_after_ms: retry_after.map(|r| r.num_milliseconds()),
        });

        if let Some(r) = retry_after {
            // Ceil to whole seconds so a client honoring the header never retries early
            let secs = (r.num_milliseconds().max(0) + 999) / 1000;
            (
                status,
                AppendHeaders([("Retry-After", secs.to_string())]),
                body,
            )
                .into_response()
        } else {
            (status, body).into_response()
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

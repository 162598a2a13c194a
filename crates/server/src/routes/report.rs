//! Issue report route handler.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Issue report body.
#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub message: String,
}

/// Acknowledgement returned to the reporter.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub status: &'static str,
}

/// Pass a user-reported issue through to the notifier.
#[instrument(skip(state, body))]
pub async fn submit(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<ReportRequest>,
) -> Result<Json<ReportResponse>> {
    let message = body.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("message must not be empty".to_owned()));
    }
    state.shop().report_issue(&user, message).await;
    Ok(Json(ReportResponse { status: "ok" }))
}

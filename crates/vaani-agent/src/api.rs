//! HTTP handlers: connection details for web callers and call job dispatch.

use crate::runtime::{DispatchedRoom, LoggedSession};
use crate::AppState;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;
use vaani_types::CallMetadata;
use vaani_voice::{entrypoint, ConnectionDetails, JobContext, Participant};

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct ConnectionDetailsQuery {
    pub language: Option<String>,
    pub voice: Option<String>,
}

/// Handler for `GET /api/connection-details`.
///
/// Missing or empty selections default to Hindi and Sarvam. Values are passed through
/// unvalidated; the agent normalises them when the caller joins.
pub async fn connection_details_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<ConnectionDetailsQuery>,
) -> Result<Json<ConnectionDetails>, ApiError> {
    let selections = CallMetadata::new(
        query
            .language
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "hi".to_string()),
        query
            .voice
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "sarvam".to_string()),
    );

    let details = state
        .voice_service
        .issue_connection_details(&selections)
        .map_err(|e| {
            tracing::error!(error = %e, "failed to issue connection details");
            ApiError::InternalServerError(e.to_string())
        })?;

    tracing::info!(
        room = %details.room_name,
        identity = %details.participant_name,
        "issued connection details"
    );
    Ok(Json(details))
}

#[derive(Debug, Deserialize)]
pub struct DispatchJobRequest {
    pub room: String,
    pub identity: String,
    #[serde(default)]
    pub metadata: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchJobResponse {
    pub job_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ListJobsResponse {
    pub jobs: Vec<Uuid>,
}

/// Handler for `POST /api/jobs`.
pub async fn dispatch_job_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<DispatchJobRequest>,
) -> Result<(StatusCode, Json<DispatchJobResponse>), ApiError> {
    if payload.room.trim().is_empty() {
        return Err(ApiError::BadRequest("room must not be empty".to_string()));
    }
    if payload.identity.trim().is_empty() {
        return Err(ApiError::BadRequest("identity must not be empty".to_string()));
    }

    let room = DispatchedRoom::new(
        payload.room.clone(),
        Participant::new(payload.identity, payload.metadata),
        state.voice_service.clone(),
    );
    let ctx = JobContext::new(
        Arc::new(room),
        Arc::new(LoggedSession),
        state.bootstrapper.clone(),
    );

    let job_id = state.jobs.spawn(&payload.room, entrypoint(ctx));
    tracing::info!(%job_id, room = %payload.room, "dispatched call job");

    Ok((StatusCode::ACCEPTED, Json(DispatchJobResponse { job_id })))
}

/// Handler for `GET /api/jobs`.
pub async fn list_jobs_handler(Extension(state): Extension<Arc<AppState>>) -> Json<ListJobsResponse> {
    Json(ListJobsResponse {
        jobs: state.jobs.active(),
    })
}

/// Handler for `DELETE /api/jobs/{jobId}`.
pub async fn cancel_job_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.jobs.cancel(&job_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("job {}", job_id)))
    }
}

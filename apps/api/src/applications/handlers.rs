//! Axum route handlers for the Applications API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::applications::ApplicationStatus;
use crate::errors::AppError;
use crate::models::job::ApplicationRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub job_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

/// POST /api/v1/students/:student_id/applications
///
/// 409 when the student already applied to this posting.
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    Json(req): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    let store = state.recommender.store();
    if store.candidate_profile(student_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Student {student_id} not found")));
    }
    if store.posting(req.job_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Job {} not found", req.job_id)));
    }

    let application = store
        .create_application(student_id, req.job_id)
        .await?
        .ok_or_else(|| {
            AppError::Conflict(format!(
                "Student {student_id} has already applied to job {}",
                req.job_id
            ))
        })?;

    Ok((StatusCode::CREATED, Json(application)))
}

/// PATCH /api/v1/applications/:application_id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    let status = ApplicationStatus::parse_decision(&req.status)?;

    let application = state
        .recommender
        .store()
        .update_application_status(application_id, status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {application_id} not found")))?;

    Ok(Json(application))
}

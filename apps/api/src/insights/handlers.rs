use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::insights::{
    placement_stats, profile_completion, progress_snapshot, PlacementStats, ProgressSnapshot,
    StudentOverview,
};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub completion_percentage: u32,
    pub progress: ProgressSnapshot,
}

async fn load_overview(state: &AppState, student_id: Uuid) -> Result<StudentOverview, AppError> {
    state
        .recommender
        .store()
        .student_overview(student_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {student_id} not found")))
}

/// GET /api/v1/students/:student_id/insights
pub async fn handle_student_insights(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<InsightsResponse>, AppError> {
    let overview = load_overview(&state, student_id).await?;
    Ok(Json(InsightsResponse {
        completion_percentage: profile_completion(&overview),
        progress: progress_snapshot(&overview, Utc::now()),
    }))
}

/// POST /api/v1/students/:student_id/progress
///
/// Appends a snapshot of the student's current metrics to the progress log.
pub async fn handle_record_progress(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<(StatusCode, Json<ProgressSnapshot>), AppError> {
    let overview = load_overview(&state, student_id).await?;
    let snapshot = progress_snapshot(&overview, Utc::now());
    state.recommender.store().record_progress(&snapshot).await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// GET /api/v1/students/:student_id/progress
///
/// The progress log, oldest first. An empty log is seeded with the
/// student's current metrics before it is returned.
pub async fn handle_progress_history(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<ProgressSnapshot>>, AppError> {
    let overview = load_overview(&state, student_id).await?;
    let store = state.recommender.store();

    let mut history = store.progress_history(student_id).await?;
    if history.is_empty() {
        store
            .record_progress(&progress_snapshot(&overview, Utc::now()))
            .await?;
        history = store.progress_history(student_id).await?;
    }
    Ok(Json(history))
}

/// GET /api/v1/colleges/:college/placement-stats
pub async fn handle_placement_stats(
    State(state): State<AppState>,
    Path(college): Path<String>,
) -> Result<Json<PlacementStats>, AppError> {
    if college.trim().is_empty() {
        return Err(AppError::Validation("college cannot be empty".to_string()));
    }

    let store = state.recommender.store();
    let cohort = store.college_cohort(&college).await?;
    let applications = if cohort.is_empty() {
        Vec::new()
    } else {
        store.applications_for_students(&cohort).await?
    };
    Ok(Json(placement_stats(&cohort, &applications)))
}

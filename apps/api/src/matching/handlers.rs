//! Axum route handlers for the Matching API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::models::{JobPosting, Recommendation, RoadmapStep};
use crate::models::job::ApplicationRow;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub student_id: Uuid,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Serialize)]
pub struct FitScoreResponse {
    pub student_id: Uuid,
    pub job_id: Uuid,
    pub fit_score: f64,
}

#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScoredJob {
    pub job: JobPosting,
    pub score: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roadmap: Vec<RoadmapStep>,
}

#[derive(Debug, Serialize)]
pub struct BrowseResponse {
    pub title: String,
    pub jobs: Vec<ScoredJob>,
}

#[derive(Debug, Serialize)]
pub struct ApplicantScore {
    pub application: ApplicationRow,
    pub fit_score: f64,
}

#[derive(Debug, Serialize)]
pub struct ApplicantsResponse {
    pub job_id: Uuid,
    pub applicants: Vec<ApplicantScore>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/students/:student_id/recommendations
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let recommendations = state.recommender.recommend(student_id).await?;
    Ok(Json(RecommendationsResponse {
        student_id,
        recommendations,
    }))
}

/// GET /api/v1/students/:student_id/jobs/:job_id/fit-score
pub async fn handle_fit_score(
    State(state): State<AppState>,
    Path((student_id, job_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<FitScoreResponse>, AppError> {
    let fit_score = state.recommender.fit_score(student_id, job_id).await?;
    Ok(Json(FitScoreResponse {
        student_id,
        job_id,
        fit_score,
    }))
}

/// GET /api/v1/students/:student_id/jobs?location=
///
/// With a location: every posting there, ranked by fit score.
/// Without one: the student's recommendations.
pub async fn handle_browse_jobs(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    Query(params): Query<BrowseQuery>,
) -> Result<Json<BrowseResponse>, AppError> {
    let location = params
        .location
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());

    let response = match location {
        Some(location) => {
            let jobs = state
                .recommender
                .browse_location(student_id, &location)
                .await?
                .into_iter()
                .map(|(job, score)| ScoredJob {
                    job,
                    score,
                    roadmap: Vec::new(),
                })
                .collect();
            BrowseResponse {
                title: format!("Jobs in {location}"),
                jobs,
            }
        }
        None => {
            let jobs = state
                .recommender
                .recommend(student_id)
                .await?
                .into_iter()
                .map(|rec| ScoredJob {
                    job: rec.job,
                    score: rec.score,
                    roadmap: rec.roadmap,
                })
                .collect();
            BrowseResponse {
                title: "Jobs Recommended For You".to_string(),
                jobs,
            }
        }
    };

    Ok(Json(response))
}

/// GET /api/v1/jobs/:job_id/applicants
///
/// Applications in applied-at order, each with the applicant's fit score.
pub async fn handle_applicants(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<ApplicantsResponse>, AppError> {
    let store = state.recommender.store();
    if store.posting(job_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }

    let applications = store.applications_for_job(job_id).await?;
    let mut applicants = Vec::with_capacity(applications.len());
    for application in applications {
        let fit_score = state
            .recommender
            .fit_score(application.student_id, job_id)
            .await?;
        applicants.push(ApplicantScore {
            application,
            fit_score,
        });
    }

    Ok(Json(ApplicantsResponse { job_id, applicants }))
}

pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::applications::handlers as applications;
use crate::insights::handlers as insights;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route(
            "/api/v1/students/:student_id/recommendations",
            get(matching::handle_recommendations),
        )
        .route(
            "/api/v1/students/:student_id/jobs",
            get(matching::handle_browse_jobs),
        )
        .route(
            "/api/v1/students/:student_id/jobs/:job_id/fit-score",
            get(matching::handle_fit_score),
        )
        .route(
            "/api/v1/jobs/:job_id/applicants",
            get(matching::handle_applicants),
        )
        // Insights API
        .route(
            "/api/v1/students/:student_id/insights",
            get(insights::handle_student_insights),
        )
        .route(
            "/api/v1/students/:student_id/progress",
            get(insights::handle_progress_history).post(insights::handle_record_progress),
        )
        .route(
            "/api/v1/colleges/:college/placement-stats",
            get(insights::handle_placement_stats),
        )
        // Applications API
        .route(
            "/api/v1/students/:student_id/applications",
            post(applications::handle_apply),
        )
        .route(
            "/api/v1/applications/:application_id/status",
            patch(applications::handle_update_status),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::insights::{ProgressSnapshot, StudentOverview};
    use crate::matching::engine::Recommender;
    use crate::matching::models::{CandidateProfile, JobPosting, ProjectSummary};
    use crate::models::job::ApplicationRow;
    use crate::store::{InMemoryStore, PlacementStore};

    struct Fixture {
        store: Arc<InMemoryStore>,
        student_id: Uuid,
        job_id: Uuid,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let student_id = Uuid::new_v4();
        store.add_student(
            "Silicon Institute of Technology",
            CandidateProfile {
                id: student_id,
                skills: vec!["python".to_string()],
                academic_score: 8.0,
                projects: vec![ProjectSummary {
                    description: Some("flask todo app".to_string()),
                }],
                applied_job_ids: HashSet::new(),
            },
            StudentOverview {
                student_id,
                academic_score: Some(8.0),
                has_mobile: true,
                skills_count: 1,
                projects_count: 1,
                ..Default::default()
            },
        );

        let job_id = Uuid::new_v4();
        store.add_posting(JobPosting {
            id: job_id,
            company_id: Uuid::new_v4(),
            role: "Backend Developer".to_string(),
            description: "python flask backend".to_string(),
            required_skills: vec!["python".to_string(), "flask".to_string()],
            min_academic_score: 7.0,
            location: "Bhubaneswar".to_string(),
        });

        Fixture {
            store,
            student_id,
            job_id,
        }
    }

    fn router(store: Arc<InMemoryStore>) -> Router {
        build_router(AppState {
            recommender: Recommender::new(store),
        })
    }

    async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        read(app, request).await
    }

    async fn send_json(app: Router, method: &str, uri: &str, payload: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();
        read(app, request).await
    }

    async fn read(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(router(fixture().store), "GET", "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_recommendations_include_roadmap() {
        let f = fixture();
        let uri = format!("/api/v1/students/{}/recommendations", f.student_id);
        let (status, body) = send(router(f.store), "GET", &uri).await;
        assert_eq!(status, StatusCode::OK);
        let recs = body["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 1);
        assert!(recs[0]["score"].as_f64().unwrap() > 25.0);
        // "flask" appears in the project description but not the skill list
        assert_eq!(recs[0]["roadmap"][0]["skill"], "Flask");
    }

    #[tokio::test]
    async fn test_recommendations_unknown_student_is_empty_not_404() {
        let f = fixture();
        let uri = format!("/api/v1/students/{}/recommendations", Uuid::new_v4());
        let (status, body) = send(router(f.store), "GET", &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["recommendations"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fit_score_unknown_job_is_zero() {
        let f = fixture();
        let uri = format!(
            "/api/v1/students/{}/jobs/{}/fit-score",
            f.student_id,
            Uuid::new_v4()
        );
        let (status, body) = send(router(f.store), "GET", &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fit_score"].as_f64(), Some(0.0));
    }

    #[tokio::test]
    async fn test_browse_by_location_and_fallback() {
        let f = fixture();
        let app = router(f.store.clone());

        let uri = format!("/api/v1/students/{}/jobs?location=Bhubaneswar", f.student_id);
        let (status, body) = send(app.clone(), "GET", &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Jobs in Bhubaneswar");
        assert_eq!(body["jobs"].as_array().unwrap().len(), 1);
        assert!(body["jobs"][0].get("roadmap").is_none());

        let uri = format!("/api/v1/students/{}/jobs?location=", f.student_id);
        let (_, body) = send(app, "GET", &uri).await;
        assert_eq!(body["title"], "Jobs Recommended For You");
    }

    #[tokio::test]
    async fn test_applicants_ranked_with_fit_scores() {
        let f = fixture();
        f.store.add_application(ApplicationRow {
            id: Uuid::new_v4(),
            student_id: f.student_id,
            job_id: f.job_id,
            status: "Applied".to_string(),
            applied_at: Utc::now() - Duration::days(1),
        });
        let app = router(f.store.clone());

        let uri = format!("/api/v1/jobs/{}/applicants", f.job_id);
        let (status, body) = send(app.clone(), "GET", &uri).await;
        assert_eq!(status, StatusCode::OK);
        let applicants = body["applicants"].as_array().unwrap();
        assert_eq!(applicants.len(), 1);
        assert!(applicants[0]["fit_score"].as_f64().unwrap() > 20.0);

        // applied jobs drop out of recommendations
        let uri = format!("/api/v1/students/{}/recommendations", f.student_id);
        let (_, body) = send(app, "GET", &uri).await;
        assert!(body["recommendations"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_applicants_unknown_job_is_404() {
        let f = fixture();
        let uri = format!("/api/v1/jobs/{}/applicants", Uuid::new_v4());
        let (status, body) = send(router(f.store), "GET", &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_insights_and_progress_log() {
        let f = fixture();
        let app = router(f.store.clone());

        let uri = format!("/api/v1/students/{}/insights", f.student_id);
        let (status, body) = send(app.clone(), "GET", &uri).await;
        assert_eq!(status, StatusCode::OK);
        // mobile, academic score, skills, projects = 4 of 8
        assert_eq!(body["completion_percentage"], 50);

        let uri = format!("/api/v1/students/{}/progress", f.student_id);
        let (status, _) = send(app.clone(), "POST", &uri).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(app, "GET", &uri).await;
        assert_eq!(status, StatusCode::OK);
        let history = body.as_array().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["skills_count"], 1);
    }

    #[tokio::test]
    async fn test_progress_history_seeds_empty_log() {
        let f = fixture();
        let app = router(f.store.clone());
        let uri = format!("/api/v1/students/{}/progress", f.student_id);

        let (status, body) = send(app.clone(), "GET", &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["academic_score"].as_f64(), Some(8.0));

        // seeding happens once; a second read does not append again
        let (_, body) = send(app, "GET", &uri).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(f.store.progress_history(f.student_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_progress_history_oldest_first() {
        let f = fixture();
        let now = Utc::now();
        let snapshot = |skills_count: usize, days_ago: i64| ProgressSnapshot {
            student_id: f.student_id,
            academic_score: 8.0,
            skills_count,
            projects_count: 1,
            certificates_count: 0,
            applications_count: 0,
            recorded_at: now - Duration::days(days_ago),
        };
        // recorded out of order
        for s in [snapshot(3, 1), snapshot(1, 10), snapshot(2, 5)] {
            f.store.record_progress(&s).await.unwrap();
        }

        let uri = format!("/api/v1/students/{}/progress", f.student_id);
        let (status, body) = send(router(f.store), "GET", &uri).await;
        assert_eq!(status, StatusCode::OK);
        let counts: Vec<u64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["skills_count"].as_u64().unwrap())
            .collect();
        assert_eq!(counts, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_progress_history_unknown_student_is_404() {
        let f = fixture();
        let uri = format!("/api/v1/students/{}/progress", Uuid::new_v4());
        let (status, _) = send(router(f.store), "GET", &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_apply_removes_job_from_recommendations() {
        let f = fixture();
        let app = router(f.store.clone());

        let recs_uri = format!("/api/v1/students/{}/recommendations", f.student_id);
        let (_, body) = send(app.clone(), "GET", &recs_uri).await;
        assert_eq!(body["recommendations"].as_array().unwrap().len(), 1);

        let uri = format!("/api/v1/students/{}/applications", f.student_id);
        let (status, body) =
            send_json(app.clone(), "POST", &uri, json!({ "job_id": f.job_id })).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "Applied");
        assert_eq!(body["job_id"], f.job_id.to_string());

        let (_, body) = send(app, "GET", &recs_uri).await;
        assert!(body["recommendations"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_application_is_conflict() {
        let f = fixture();
        let app = router(f.store.clone());
        let uri = format!("/api/v1/students/{}/applications", f.student_id);

        let (status, _) = send_json(app.clone(), "POST", &uri, json!({ "job_id": f.job_id })).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = send_json(app, "POST", &uri, json!({ "job_id": f.job_id })).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");
        assert_eq!(f.store.applications_for_job(f.job_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_apply_to_unknown_job_is_404() {
        let f = fixture();
        let uri = format!("/api/v1/students/{}/applications", f.student_id);
        let (status, _) =
            send_json(router(f.store), "POST", &uri, json!({ "job_id": Uuid::new_v4() })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_accepting_application_counts_as_placed() {
        let f = fixture();
        let app = router(f.store.clone());
        let stats_uri = "/api/v1/colleges/Silicon%20Institute%20of%20Technology/placement-stats";

        let uri = format!("/api/v1/students/{}/applications", f.student_id);
        let (_, body) = send_json(app.clone(), "POST", &uri, json!({ "job_id": f.job_id })).await;
        let application_id = body["id"].as_str().unwrap().to_string();

        let (_, body) = send(app.clone(), "GET", stats_uri).await;
        assert_eq!(body["placed"], 0);

        let uri = format!("/api/v1/applications/{application_id}/status");
        let (status, body) =
            send_json(app.clone(), "PATCH", &uri, json!({ "status": "Accepted" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Accepted");

        let (_, body) = send(app, "GET", stats_uri).await;
        assert_eq!(body["placed"], 1);
        assert_eq!(body["rate"].as_f64(), Some(100.0));
    }

    #[tokio::test]
    async fn test_status_update_rejects_unknown_status() {
        let f = fixture();
        let app = router(f.store.clone());
        let uri = format!("/api/v1/students/{}/applications", f.student_id);
        let (_, body) = send_json(app.clone(), "POST", &uri, json!({ "job_id": f.job_id })).await;
        let application_id = body["id"].as_str().unwrap().to_string();

        let uri = format!("/api/v1/applications/{application_id}/status");
        let (status, body) = send_json(app, "PATCH", &uri, json!({ "status": "Hired" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        let stored = f.store.applications_for_job(f.job_id).await.unwrap();
        assert_eq!(stored[0].status, "Applied");
    }

    #[tokio::test]
    async fn test_status_update_unknown_application_is_404() {
        let f = fixture();
        let uri = format!("/api/v1/applications/{}/status", Uuid::new_v4());
        let (status, _) =
            send_json(router(f.store), "PATCH", &uri, json!({ "status": "Rejected" })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_insights_unknown_student_is_404() {
        let f = fixture();
        let uri = format!("/api/v1/students/{}/insights", Uuid::new_v4());
        let (status, _) = send(router(f.store), "GET", &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_placement_stats_for_college() {
        let f = fixture();
        f.store.add_application(ApplicationRow {
            id: Uuid::new_v4(),
            student_id: f.student_id,
            job_id: f.job_id,
            status: "Accepted".to_string(),
            applied_at: Utc::now(),
        });
        let uri = "/api/v1/colleges/Silicon%20Institute%20of%20Technology/placement-stats";
        let (status, body) = send(router(f.store), "GET", uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["placed"], 1);
        assert_eq!(body["rate"].as_f64(), Some(100.0));
    }
}

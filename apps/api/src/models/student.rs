use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentRow {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub college: String,
    pub cgpa: Option<f64>,
    pub profile_photo: Option<String>,
    /// JSON-encoded list of strings. May be missing or malformed.
    pub skills: Option<String>,
    pub summary: Option<String>,
    pub linkedin_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub project_title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProgressRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub cgpa: f64,
    pub skills_count: i32,
    pub projects_count: i32,
    pub certificates_count: i32,
    pub applications_count: i32,
    pub recorded_at: DateTime<Utc>,
}

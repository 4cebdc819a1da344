use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::applications::ApplicationStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPostingRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub job_role: String,
    pub description: Option<String>,
    /// JSON-encoded list of strings. May be missing or malformed.
    pub required_skills: Option<String>,
    pub cgpa_required: f64,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub job_id: Uuid,
    pub status: String,
    pub applied_at: DateTime<Utc>,
}

impl ApplicationRow {
    pub fn is_accepted(&self) -> bool {
        self.status == ApplicationStatus::Accepted.as_str()
    }
}

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::applications::ApplicationStatus;
use crate::errors::AppError;
use crate::insights::{ProgressSnapshot, StudentOverview};
use crate::matching::models::{CandidateProfile, JobPosting};
use crate::models::job::ApplicationRow;
use crate::store::PlacementStore;

#[derive(Default)]
struct Inner {
    profiles: HashMap<Uuid, CandidateProfile>,
    overviews: HashMap<Uuid, StudentOverview>,
    colleges: HashMap<Uuid, String>,
    postings: Vec<JobPosting>,
    applications: Vec<ApplicationRow>,
    progress: Vec<ProgressSnapshot>,
}

/// Process-local store for engine and router tests.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_student(&self, college: &str, profile: CandidateProfile, overview: StudentOverview) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.colleges.insert(profile.id, college.to_string());
        inner.overviews.insert(profile.id, overview);
        inner.profiles.insert(profile.id, profile);
    }

    /// Postings keep insertion order.
    pub fn add_posting(&self, posting: JobPosting) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.postings.push(posting);
    }

    pub fn add_application(&self, application: ApplicationRow) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if let Some(profile) = inner.profiles.get_mut(&application.student_id) {
            profile.applied_job_ids.insert(application.job_id);
        }
        inner.applications.push(application);
    }
}

#[async_trait]
impl PlacementStore for InMemoryStore {
    async fn candidate_profile(
        &self,
        student_id: Uuid,
    ) -> Result<Option<CandidateProfile>, AppError> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(inner.profiles.get(&student_id).cloned())
    }

    async fn open_postings(&self) -> Result<Vec<JobPosting>, AppError> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(inner.postings.clone())
    }

    async fn posting(&self, job_id: Uuid) -> Result<Option<JobPosting>, AppError> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(inner.postings.iter().find(|p| p.id == job_id).cloned())
    }

    async fn postings_in_location(&self, location: &str) -> Result<Vec<JobPosting>, AppError> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(inner
            .postings
            .iter()
            .rev()
            .filter(|p| p.location == location)
            .cloned()
            .collect())
    }

    async fn applications_for_job(&self, job_id: Uuid) -> Result<Vec<ApplicationRow>, AppError> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let mut apps: Vec<ApplicationRow> = inner
            .applications
            .iter()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect();
        apps.sort_by_key(|a| a.applied_at);
        Ok(apps)
    }

    async fn student_overview(
        &self,
        student_id: Uuid,
    ) -> Result<Option<StudentOverview>, AppError> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(inner.overviews.get(&student_id).cloned())
    }

    async fn college_cohort(&self, college: &str) -> Result<Vec<Uuid>, AppError> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(inner
            .colleges
            .iter()
            .filter(|(_, c)| c.as_str() == college)
            .map(|(id, _)| *id)
            .collect())
    }

    async fn applications_for_students(
        &self,
        student_ids: &[Uuid],
    ) -> Result<Vec<ApplicationRow>, AppError> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(inner
            .applications
            .iter()
            .filter(|a| student_ids.contains(&a.student_id))
            .cloned()
            .collect())
    }

    async fn create_application(
        &self,
        student_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<ApplicationRow>, AppError> {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if inner
            .applications
            .iter()
            .any(|a| a.student_id == student_id && a.job_id == job_id)
        {
            return Ok(None);
        }

        let application = ApplicationRow {
            id: Uuid::new_v4(),
            student_id,
            job_id,
            status: ApplicationStatus::Applied.as_str().to_string(),
            applied_at: Utc::now(),
        };
        if let Some(profile) = inner.profiles.get_mut(&student_id) {
            profile.applied_job_ids.insert(job_id);
        }
        inner.applications.push(application.clone());
        Ok(Some(application))
    }

    async fn update_application_status(
        &self,
        application_id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<ApplicationRow>, AppError> {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        Ok(inner
            .applications
            .iter_mut()
            .find(|a| a.id == application_id)
            .map(|a| {
                a.status = status.as_str().to_string();
                a.clone()
            }))
    }

    async fn record_progress(&self, snapshot: &ProgressSnapshot) -> Result<(), AppError> {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.progress.push(snapshot.clone());
        Ok(())
    }

    async fn progress_history(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<ProgressSnapshot>, AppError> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let mut history: Vec<ProgressSnapshot> = inner
            .progress
            .iter()
            .filter(|s| s.student_id == student_id)
            .cloned()
            .collect();
        history.sort_by_key(|s| s.recorded_at);
        Ok(history)
    }
}

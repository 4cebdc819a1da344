//! Storage boundary. The matching engine sees only the narrow read-only
//! views produced here; JSON skill columns are decoded at this layer.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::applications::ApplicationStatus;
use crate::errors::AppError;
use crate::insights::{ProgressSnapshot, StudentOverview};
use crate::matching::models::{CandidateProfile, JobPosting};
use crate::models::job::ApplicationRow;

#[cfg(test)]
pub use memory::InMemoryStore;
pub use postgres::PgPlacementStore;

/// Read access to students and postings, application writes, and the
/// append-only progress log.
///
/// Carried in `AppState` as `Arc<dyn PlacementStore>`.
#[async_trait]
pub trait PlacementStore: Send + Sync {
    async fn candidate_profile(&self, student_id: Uuid)
        -> Result<Option<CandidateProfile>, AppError>;

    /// All open postings in a stable order (oldest first).
    async fn open_postings(&self) -> Result<Vec<JobPosting>, AppError>;

    async fn posting(&self, job_id: Uuid) -> Result<Option<JobPosting>, AppError>;

    /// Postings in one location, newest first.
    async fn postings_in_location(&self, location: &str) -> Result<Vec<JobPosting>, AppError>;

    /// Applications for a posting in applied-at order.
    async fn applications_for_job(&self, job_id: Uuid) -> Result<Vec<ApplicationRow>, AppError>;

    async fn student_overview(&self, student_id: Uuid)
        -> Result<Option<StudentOverview>, AppError>;

    /// Student ids belonging to a college.
    async fn college_cohort(&self, college: &str) -> Result<Vec<Uuid>, AppError>;

    async fn applications_for_students(
        &self,
        student_ids: &[Uuid],
    ) -> Result<Vec<ApplicationRow>, AppError>;

    /// Inserts an `Applied` application. `None` when the (student, job)
    /// pair already exists.
    async fn create_application(
        &self,
        student_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<ApplicationRow>, AppError>;

    /// `None` when the application does not exist.
    async fn update_application_status(
        &self,
        application_id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<ApplicationRow>, AppError>;

    async fn record_progress(&self, snapshot: &ProgressSnapshot) -> Result<(), AppError>;

    /// A student's progress log, oldest first.
    async fn progress_history(&self, student_id: Uuid)
        -> Result<Vec<ProgressSnapshot>, AppError>;
}

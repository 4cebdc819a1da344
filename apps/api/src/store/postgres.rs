use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::applications::ApplicationStatus;
use crate::errors::AppError;
use crate::insights::{ProgressSnapshot, StudentOverview};
use crate::matching::models::{CandidateProfile, JobPosting, ProjectSummary};
use crate::matching::skills::parse_skill_list;
use crate::models::job::{ApplicationRow, JobPostingRow};
use crate::models::student::{ProgressRow, ProjectRow, StudentRow};
use crate::store::PlacementStore;

pub struct PgPlacementStore {
    pool: PgPool,
}

impl PgPlacementStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn student_row(&self, student_id: Uuid) -> Result<Option<StudentRow>, AppError> {
        Ok(
            sqlx::query_as::<_, StudentRow>("SELECT * FROM students WHERE id = $1")
                .bind(student_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn count(&self, sql: &str, student_id: Uuid) -> Result<usize, AppError> {
        let n: i64 = sqlx::query_scalar(sql)
            .bind(student_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(n.max(0) as usize)
    }
}

impl From<JobPostingRow> for JobPosting {
    fn from(row: JobPostingRow) -> Self {
        JobPosting {
            id: row.id,
            company_id: row.company_id,
            role: row.job_role,
            description: row.description.unwrap_or_default(),
            required_skills: parse_skill_list(row.required_skills.as_deref()),
            min_academic_score: row.cgpa_required,
            location: row.location,
        }
    }
}

impl From<ProgressRow> for ProgressSnapshot {
    fn from(row: ProgressRow) -> Self {
        ProgressSnapshot {
            student_id: row.student_id,
            academic_score: row.cgpa,
            skills_count: row.skills_count.max(0) as usize,
            projects_count: row.projects_count.max(0) as usize,
            certificates_count: row.certificates_count.max(0) as usize,
            applications_count: row.applications_count.max(0) as usize,
            recorded_at: row.recorded_at,
        }
    }
}

#[async_trait]
impl PlacementStore for PgPlacementStore {
    async fn candidate_profile(
        &self,
        student_id: Uuid,
    ) -> Result<Option<CandidateProfile>, AppError> {
        let Some(student) = self.student_row(student_id).await? else {
            return Ok(None);
        };

        let projects = sqlx::query_as::<_, ProjectRow>(
            "SELECT * FROM student_projects WHERE student_id = $1 ORDER BY created_at, id",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        let applied: Vec<Uuid> =
            sqlx::query_scalar("SELECT job_id FROM job_applications WHERE student_id = $1")
                .bind(student_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(Some(CandidateProfile {
            id: student.id,
            skills: parse_skill_list(student.skills.as_deref()),
            academic_score: student.cgpa.unwrap_or(0.0),
            projects: projects
                .into_iter()
                .map(|p| ProjectSummary {
                    description: p.description,
                })
                .collect(),
            applied_job_ids: applied.into_iter().collect::<HashSet<_>>(),
        }))
    }

    async fn open_postings(&self) -> Result<Vec<JobPosting>, AppError> {
        let rows = sqlx::query_as::<_, JobPostingRow>(
            "SELECT * FROM job_postings ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(JobPosting::from).collect())
    }

    async fn posting(&self, job_id: Uuid) -> Result<Option<JobPosting>, AppError> {
        let row = sqlx::query_as::<_, JobPostingRow>("SELECT * FROM job_postings WHERE id = $1")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(JobPosting::from))
    }

    async fn postings_in_location(&self, location: &str) -> Result<Vec<JobPosting>, AppError> {
        let rows = sqlx::query_as::<_, JobPostingRow>(
            "SELECT * FROM job_postings WHERE location = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(location)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(JobPosting::from).collect())
    }

    async fn applications_for_job(&self, job_id: Uuid) -> Result<Vec<ApplicationRow>, AppError> {
        Ok(sqlx::query_as::<_, ApplicationRow>(
            "SELECT * FROM job_applications WHERE job_id = $1 ORDER BY applied_at ASC",
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn student_overview(
        &self,
        student_id: Uuid,
    ) -> Result<Option<StudentOverview>, AppError> {
        let Some(student) = self.student_row(student_id).await? else {
            return Ok(None);
        };

        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());

        Ok(Some(StudentOverview {
            student_id,
            academic_score: student.cgpa,
            has_profile_photo: present(&student.profile_photo),
            has_mobile: present(&student.mobile),
            has_summary: present(&student.summary),
            has_linkedin: present(&student.linkedin_url),
            skills_count: parse_skill_list(student.skills.as_deref()).len(),
            projects_count: self
                .count("SELECT COUNT(*) FROM student_projects WHERE student_id = $1", student_id)
                .await?,
            certificates_count: self
                .count("SELECT COUNT(*) FROM certificates WHERE student_id = $1", student_id)
                .await?,
            applications_count: self
                .count("SELECT COUNT(*) FROM job_applications WHERE student_id = $1", student_id)
                .await?,
        }))
    }

    async fn college_cohort(&self, college: &str) -> Result<Vec<Uuid>, AppError> {
        Ok(sqlx::query_scalar("SELECT id FROM students WHERE college = $1")
            .bind(college)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn applications_for_students(
        &self,
        student_ids: &[Uuid],
    ) -> Result<Vec<ApplicationRow>, AppError> {
        Ok(sqlx::query_as::<_, ApplicationRow>(
            "SELECT * FROM job_applications WHERE student_id = ANY($1)",
        )
        .bind(student_ids)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create_application(
        &self,
        student_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<ApplicationRow>, AppError> {
        let application = sqlx::query_as::<_, ApplicationRow>(
            r#"
            INSERT INTO job_applications (id, student_id, job_id, status)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (student_id, job_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(student_id)
        .bind(job_id)
        .bind(ApplicationStatus::Applied.as_str())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(app) = &application {
            info!("Student {} applied to job {} ({})", student_id, job_id, app.id);
        }
        Ok(application)
    }

    async fn update_application_status(
        &self,
        application_id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<ApplicationRow>, AppError> {
        let application = sqlx::query_as::<_, ApplicationRow>(
            "UPDATE job_applications SET status = $1 WHERE id = $2 RETURNING *",
        )
        .bind(status.as_str())
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await?;

        if application.is_some() {
            info!("Application {} marked {}", application_id, status.as_str());
        }
        Ok(application)
    }

    /// Append-only: snapshots are inserted, never updated.
    async fn record_progress(&self, snapshot: &ProgressSnapshot) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO student_progress
                (id, student_id, cgpa, skills_count, projects_count,
                 certificates_count, applications_count, recorded_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(snapshot.student_id)
        .bind(snapshot.academic_score)
        .bind(snapshot.skills_count as i32)
        .bind(snapshot.projects_count as i32)
        .bind(snapshot.certificates_count as i32)
        .bind(snapshot.applications_count as i32)
        .bind(snapshot.recorded_at)
        .execute(&self.pool)
        .await?;

        info!("Recorded progress snapshot for student {}", snapshot.student_id);
        Ok(())
    }

    async fn progress_history(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<ProgressSnapshot>, AppError> {
        let rows = sqlx::query_as::<_, ProgressRow>(
            "SELECT * FROM student_progress WHERE student_id = $1 ORDER BY recorded_at ASC, id ASC",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ProgressSnapshot::from).collect())
    }
}

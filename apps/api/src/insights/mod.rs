//! Student-facing progress insights: profile completion, progress snapshots,
//! and cohort placement statistics. All values are computed from live data.

pub mod handlers;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::job::ApplicationRow;

/// Everything the insights need about one student, loaded by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentOverview {
    pub student_id: Uuid,
    pub academic_score: Option<f64>,
    pub has_profile_photo: bool,
    pub has_mobile: bool,
    pub has_summary: bool,
    pub has_linkedin: bool,
    pub skills_count: usize,
    pub projects_count: usize,
    pub certificates_count: usize,
    pub applications_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub student_id: Uuid,
    pub academic_score: f64,
    pub skills_count: usize,
    pub projects_count: usize,
    pub certificates_count: usize,
    pub applications_count: usize,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementStats {
    pub total: usize,
    pub placed: usize,
    pub rate: f64,
}

const COMPLETION_CHECKS: u32 = 8;

/// Integer percentage of the 8 profile checks that are satisfied (floored).
pub fn profile_completion(overview: &StudentOverview) -> u32 {
    let checks = [
        overview.has_profile_photo,
        overview.has_mobile,
        overview.academic_score.is_some_and(|s| s > 0.0),
        overview.has_summary,
        overview.has_linkedin,
        overview.skills_count > 0,
        overview.projects_count > 0,
        overview.certificates_count > 0,
    ];
    let completed = checks.iter().filter(|c| **c).count() as u32;
    completed * 100 / COMPLETION_CHECKS
}

pub fn progress_snapshot(overview: &StudentOverview, recorded_at: DateTime<Utc>) -> ProgressSnapshot {
    ProgressSnapshot {
        student_id: overview.student_id,
        academic_score: overview.academic_score.unwrap_or(0.0),
        skills_count: overview.skills_count,
        projects_count: overview.projects_count,
        certificates_count: overview.certificates_count,
        applications_count: overview.applications_count,
        recorded_at,
    }
}

/// Placed = distinct cohort students holding at least one accepted application.
pub fn placement_stats(cohort: &[Uuid], applications: &[ApplicationRow]) -> PlacementStats {
    if cohort.is_empty() {
        return PlacementStats {
            total: 0,
            placed: 0,
            rate: 0.0,
        };
    }

    let members: HashSet<Uuid> = cohort.iter().copied().collect();
    let placed = applications
        .iter()
        .filter(|a| a.is_accepted() && members.contains(&a.student_id))
        .map(|a| a.student_id)
        .collect::<HashSet<_>>()
        .len();

    let total = members.len();
    let rate = (placed as f64 / total as f64 * 1000.0).round() / 10.0;
    PlacementStats { total, placed, rate }
}

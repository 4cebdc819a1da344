//! Composite Scorer — content similarity blended with the academic threshold
//! and project-count bonuses.

use crate::matching::models::{CandidateProfile, JobPosting};

pub const ACADEMIC_BONUS: f64 = 10.0;
pub const PROJECT_BONUS_PER_PROJECT: f64 = 10.0;
pub const PROJECT_BONUS_CAP: f64 = 20.0;

/// Scaling applied to content similarity. The two call sites differ:
/// recommendations blend three signals, the fit score is content-driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentWeight {
    Recommendation,
    FitScore,
}

impl ContentWeight {
    pub fn factor(self) -> f64 {
        match self {
            ContentWeight::Recommendation => 70.0,
            ContentWeight::FitScore => 100.0,
        }
    }
}

/// 10 when the candidate has a non-zero score meeting the requirement.
pub fn academic_bonus(profile: &CandidateProfile, job: &JobPosting) -> f64 {
    if profile.academic_score != 0.0 && profile.academic_score >= job.min_academic_score {
        ACADEMIC_BONUS
    } else {
        0.0
    }
}

pub fn project_bonus(project_count: usize) -> f64 {
    (project_count as f64 * PROJECT_BONUS_PER_PROJECT).min(PROJECT_BONUS_CAP)
}

/// content + academic bonus + project bonus, rounded to 2 decimals. No upper clamp.
pub fn composite_score(
    profile: &CandidateProfile,
    job: &JobPosting,
    similarity: f64,
    weight: ContentWeight,
) -> f64 {
    let content = similarity * weight.factor();
    let total = content + academic_bonus(profile, job) + project_bonus(profile.project_count());
    round2(total)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

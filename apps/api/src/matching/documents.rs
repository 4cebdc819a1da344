//! Document Builder — the bag-of-words text representing each side of a match.

use crate::matching::models::{CandidateProfile, JobPosting};

/// Raw skill tokens followed by every non-empty project description.
pub fn student_document(profile: &CandidateProfile) -> String {
    let skills = profile.skills.join(" ");
    let projects = profile
        .projects
        .iter()
        .filter_map(|p| p.description.as_deref())
        .filter(|d| !d.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    format!("{skills} {projects}")
}

/// Role title, description, then required skills.
pub fn job_document(job: &JobPosting) -> String {
    format!(
        "{} {} {}",
        job.role,
        job.description,
        job.required_skills.join(" ")
    )
}

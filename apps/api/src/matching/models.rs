use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matching::skills::normalize;

/// A project authored by a candidate. Only the description feeds matching.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub description: Option<String>,
}

/// Read-only projection of a student, built per request by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: Uuid,
    /// Skills exactly as entered (already deserialized).
    pub skills: Vec<String>,
    /// GPA-like score, conventionally 0–10. Zero means "not provided".
    pub academic_score: f64,
    pub projects: Vec<ProjectSummary>,
    pub applied_job_ids: HashSet<Uuid>,
}

impl CandidateProfile {
    pub fn skill_set(&self) -> BTreeSet<String> {
        normalize(&self.skills)
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn has_applied_to(&self, job_id: Uuid) -> bool {
        self.applied_job_ids.contains(&job_id)
    }
}

/// Read-only projection of an open job posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: Uuid,
    pub company_id: Uuid,
    pub role: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub min_academic_score: f64,
    pub location: String,
}

impl JobPosting {
    pub fn skill_set(&self) -> BTreeSet<String> {
        normalize(&self.required_skills)
    }
}

/// One step of a learning roadmap: a missing skill and where to learn it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub skill: String,
    pub resource_url: String,
}

/// A ranked posting for a student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub job: JobPosting,
    pub score: f64,
    pub roadmap: Vec<RoadmapStep>,
}

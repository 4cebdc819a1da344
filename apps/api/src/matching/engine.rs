//! Recommendation Engine — ranks every open posting for a student and scores
//! single student/posting pairs.
//!
//! Pure functions (`recommend_for`, `fit_score_for`) hold the algorithm;
//! `Recommender` loads the views from a `PlacementStore` and applies the
//! missing-entity defaults (empty list, score 0).

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::composite::{composite_score, ContentWeight};
use crate::matching::documents::{job_document, student_document};
use crate::matching::models::{CandidateProfile, JobPosting, Recommendation};
use crate::matching::roadmap::build_roadmap;
use crate::matching::similarity;
use crate::store::PlacementStore;

/// Recommendations must score strictly above this.
pub const MIN_RECOMMENDATION_SCORE: f64 = 25.0;
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Scores all postings in one batched vectorization, drops applied-to jobs
/// and anything at or below the threshold, sorts descending (stable on ties),
/// keeps the top five.
pub fn recommend_for(profile: &CandidateProfile, postings: &[JobPosting]) -> Vec<Recommendation> {
    if postings.is_empty() {
        return Vec::new();
    }

    let query = student_document(profile);
    let candidates: Vec<String> = postings.iter().map(job_document).collect();
    let similarities = similarity::score(&query, &candidates);
    let student_skills = profile.skill_set();

    let mut ranked: Vec<Recommendation> = postings
        .iter()
        .zip(similarities)
        .filter(|(job, _)| !profile.has_applied_to(job.id))
        .map(|(job, sim)| Recommendation {
            job: job.clone(),
            score: composite_score(profile, job, sim, ContentWeight::Recommendation),
            roadmap: build_roadmap(&job.skill_set(), &student_skills),
        })
        .filter(|rec| rec.score > MIN_RECOMMENDATION_SCORE)
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(MAX_RECOMMENDATIONS);
    ranked
}

/// Single-pair composite score with full content weight; no threshold.
pub fn fit_score_for(profile: &CandidateProfile, job: &JobPosting) -> f64 {
    let sims = similarity::score(&student_document(profile), &[job_document(job)]);
    let sim = sims.first().copied().unwrap_or(0.0);
    composite_score(profile, job, sim, ContentWeight::FitScore)
}

/// Store-backed entry point. Every call re-reads and re-vectorizes live data.
#[derive(Clone)]
pub struct Recommender {
    store: Arc<dyn PlacementStore>,
}

impl Recommender {
    pub fn new(store: Arc<dyn PlacementStore>) -> Self {
        Self { store }
    }

    /// Up to five ranked postings; empty when the student is unknown.
    pub async fn recommend(&self, student_id: Uuid) -> Result<Vec<Recommendation>, AppError> {
        let Some(profile) = self.store.candidate_profile(student_id).await? else {
            debug!("No profile for student {student_id}; no recommendations");
            return Ok(Vec::new());
        };

        let postings = self.store.open_postings().await?;
        let recommendations = recommend_for(&profile, &postings);

        info!(
            "Recommended {} of {} postings for student {student_id}",
            recommendations.len(),
            postings.len()
        );
        Ok(recommendations)
    }

    /// Zero when either the student or the posting is unknown.
    pub async fn fit_score(&self, student_id: Uuid, job_id: Uuid) -> Result<f64, AppError> {
        let Some(profile) = self.store.candidate_profile(student_id).await? else {
            return Ok(0.0);
        };
        let Some(job) = self.store.posting(job_id).await? else {
            return Ok(0.0);
        };
        Ok(fit_score_for(&profile, &job))
    }

    /// Fit score for every posting in a location, highest first.
    pub async fn browse_location(
        &self,
        student_id: Uuid,
        location: &str,
    ) -> Result<Vec<(JobPosting, f64)>, AppError> {
        let postings = self.store.postings_in_location(location).await?;
        let profile = self.store.candidate_profile(student_id).await?;

        let mut scored: Vec<(JobPosting, f64)> = postings
            .into_iter()
            .map(|job| {
                let score = profile.as_ref().map_or(0.0, |p| fit_score_for(p, &job));
                (job, score)
            })
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        Ok(scored)
    }

    pub fn store(&self) -> &Arc<dyn PlacementStore> {
        &self.store
    }
}

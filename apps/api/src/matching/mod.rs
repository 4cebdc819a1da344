// Matching engine: skill normalization, document building, TF-IDF similarity,
// composite scoring, learning roadmaps, and recommendation ranking.
// No persistent state; every call works on freshly loaded views.

pub mod composite;
pub mod documents;
pub mod engine;
pub mod handlers;
pub mod models;
pub mod roadmap;
pub mod similarity;
pub mod skills;

use crate::matching::engine::Recommender;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Matching engine over the pluggable store. Default: `PgPlacementStore`.
    pub recommender: Recommender,
}

//! Skill Normalizer — canonical skill sets for set comparisons.

use std::collections::BTreeSet;

use tracing::debug;

/// Lowercases and trims each entry, drops empties, deduplicates.
///
/// A `BTreeSet` keeps iteration lexicographic, which the roadmap relies on
/// for deterministic ordering.
pub fn normalize<S: AsRef<str>>(raw: &[S]) -> BTreeSet<String> {
    raw.iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Deserializes a stored skill list (JSON array of strings).
///
/// Missing, empty, or malformed text yields an empty list — never an error.
pub fn parse_skill_list(serialized: Option<&str>) -> Vec<String> {
    let Some(text) = serialized.map(str::trim).filter(|t| !t.is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<String>>(text) {
        Ok(list) => list,
        Err(e) => {
            debug!("Malformed skill list treated as empty: {e}");
            Vec::new()
        }
    }
}

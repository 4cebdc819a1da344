//! Roadmap Builder — one learning resource per missing, known skill.

use std::collections::BTreeSet;

use crate::matching::models::RoadmapStep;

/// Closed skill → resource table. Keys are normalized skill names.
pub const SKILL_RESOURCES: &[(&str, &str)] = &[
    ("python", "https://www.youtube.com/watch?v=rfscVS0vtbw"),
    ("flask", "https://www.youtube.com/watch?v=oQ5UfJqW5Jo"),
    ("pandas", "https://www.youtube.com/watch?v=EhYC02PD_gc"),
    ("numpy", "https://www.youtube.com/watch?v=YqUcT-BFUM0"),
    ("machine learning", "https://www.youtube.com/watch?v=SQkaBIP2JoA"),
    ("javascript", "https://www.youtube.com/watch?v=FtaQSdrl7YA"),
    ("react", "https://www.youtube.com/watch?v=lAFbKzO-fss"),
    ("html", "https://www.youtube.com/watch?v=kUMe1FH4CHE"),
    ("css", "https://www.youtube.com/watch?v=OEV8gHsKqL4"),
    ("sql", "https://www.youtube.com/watch?v=NTgejLheGeU"),
    ("c++", "https://www.youtube.com/watch?v=vLnPwxZdW4Y"),
    ("java", "https://www.youtube.com/watch?v=A74TOX803D0"),
];

pub fn resource_for(skill: &str) -> Option<&'static str> {
    SKILL_RESOURCES
        .iter()
        .find(|(key, _)| *key == skill)
        .map(|(_, url)| *url)
}

/// `job_skills − student_skills`, filtered to known resources, in
/// lexicographic skill order. Both sets must already be normalized.
pub fn build_roadmap(
    job_skills: &BTreeSet<String>,
    student_skills: &BTreeSet<String>,
) -> Vec<RoadmapStep> {
    job_skills
        .difference(student_skills)
        .filter_map(|skill| {
            resource_for(skill).map(|url| RoadmapStep {
                skill: capitalize(skill),
                resource_url: url.to_string(),
            })
        })
        .collect()
}

/// First character uppercased, the rest lowercased ("machine learning" → "Machine learning").
fn capitalize(skill: &str) -> String {
    let mut chars = skill.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

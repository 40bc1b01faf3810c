//! Caller-supplied filter predicates.

use super::types::{Job, SearchFilters};

/// Keep the jobs matching every non-empty filter field, in their original order.
///
/// Matching is a case-insensitive substring test: `category` against tags or
/// title, `location` against location. `experience_level` is accepted but not
/// applied.
pub fn apply_filters(jobs: Vec<Job>, filters: &SearchFilters) -> Vec<Job> {
    let categories = normalized(filters.category.as_deref());
    let locations = normalized(filters.location.as_deref());

    if categories.is_empty() && locations.is_empty() {
        return jobs;
    }

    jobs.into_iter()
        .filter(|job| categories.is_empty() || matches_category(job, &categories))
        .filter(|job| locations.is_empty() || matches_location(job, &locations))
        .collect()
}

fn normalized(values: Option<&[String]>) -> Vec<String> {
    values
        .unwrap_or_default()
        .iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

fn matches_category(job: &Job, categories: &[String]) -> bool {
    let title = job.title.to_lowercase();
    let tags: Vec<String> = job.tags.iter().map(|t| t.to_lowercase()).collect();

    categories
        .iter()
        .any(|cat| title.contains(cat) || tags.iter().any(|tag| tag.contains(cat)))
}

fn matches_location(job: &Job, locations: &[String]) -> bool {
    let location = job.location.to_lowercase();
    locations.iter().any(|loc| location.contains(loc))
}

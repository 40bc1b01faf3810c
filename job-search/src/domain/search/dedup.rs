//! Cross-board duplicate removal.

use std::collections::HashSet;

use super::types::Job;

/// `lower(title)|lower(company)`.
pub fn identity_key(job: &Job) -> String {
    format!("{}|{}", job.title.to_lowercase(), job.company.to_lowercase())
}

/// Drop every job whose identity key was already seen, keeping the first occurrence.
///
/// The same role at the same company posted to several boards collapses into
/// one listing, whatever the salary or description says. Jobs repeating an
/// already seen `id` are dropped as well.
pub fn deduplicate(jobs: Vec<Job>) -> Vec<Job> {
    let mut seen_keys = HashSet::new();
    let mut seen_ids = HashSet::new();

    jobs.into_iter()
        .filter(|job| {
            let key = identity_key(job);
            if seen_keys.contains(&key) || seen_ids.contains(&job.id) {
                return false;
            }
            seen_keys.insert(key);
            seen_ids.insert(job.id.clone());
            true
        })
        .collect()
}

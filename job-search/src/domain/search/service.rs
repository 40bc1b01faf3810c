//! The job search pipeline: fetch, filter, dedup, rank.

use std::time::Instant;

use tracing::{info, warn};

use super::dedup::deduplicate;
use super::fetcher::FanOutFetcher;
use super::filter::apply_filters;
use super::ranker::Ranker;
use super::types::{FetchReport, Job, SearchFilters, SourceStatus};

/// Runs one search across every configured board.
///
/// # Examples
///
/// ```ignore
/// let service = JobSearchService::new(fetcher, Ranker::default());
/// let jobs = service.search_jobs("rust engineer", None).await;
/// ```
pub struct JobSearchService {
    fetcher: FanOutFetcher,
    ranker: Ranker,
}

impl JobSearchService {
    pub fn new(fetcher: FanOutFetcher, ranker: Ranker) -> Self {
        Self { fetcher, ranker }
    }

    /// Create a service with the default ranking tables.
    pub fn with_defaults(fetcher: FanOutFetcher) -> Self {
        Self::new(fetcher, Ranker::default())
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.fetcher.source_names()
    }

    /// Search all boards for `query`.
    ///
    /// Never fails. Sources that are down contribute nothing; an empty result
    /// is logged as either "no data found" or "all sources degraded".
    pub async fn search_jobs(&self, query: &str, filters: Option<&SearchFilters>) -> Vec<Job> {
        let started = Instant::now();
        let query = query.trim();

        let report = self.fetcher.fetch_all(query).await;
        log_fetch_report(query, &report);

        let fetched = report.jobs.len();
        let jobs = match filters {
            Some(filters) => apply_filters(report.jobs, filters),
            None => report.jobs,
        };
        let filtered = jobs.len();
        let jobs = deduplicate(jobs);
        let unique = jobs.len();
        let jobs = self.ranker.rank(jobs, query);

        info!(
            query,
            fetched,
            filtered,
            unique,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Job search completed"
        );

        jobs
    }
}

fn log_fetch_report(query: &str, report: &FetchReport) {
    let skipped = report
        .outcomes
        .iter()
        .filter(|o| matches!(o.status, SourceStatus::Skipped { .. }))
        .count();
    let timed_out = report
        .outcomes
        .iter()
        .filter(|o| o.status == SourceStatus::TimedOut)
        .count();

    info!(
        query,
        sources = report.outcomes.len(),
        succeeded = report.succeeded(),
        skipped,
        timed_out,
        failed = report.degraded() - skipped - timed_out,
        jobs = report.jobs.len(),
        "Fetched job boards"
    );

    if let Some(reason) = report.empty_reason() {
        warn!(query, reason = %reason, "No jobs fetched");
    }
}

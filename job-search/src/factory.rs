//! Composition root: the only place that wires concrete board adapters into the pipeline.

use std::sync::Arc;

use job_boards::BoardClient;
use tracing::{info, warn};

use crate::config::Settings;
use crate::domain::search::{
    build_sources, FanOutFetcher, JobSearchService, Ranker, SearchError, SourceCredentials,
};

/// Build a ready-to-use search service from settings.
///
/// Boards whose credentials are missing stay enabled; they report themselves
/// as skipped on every search.
pub fn build_search_service(settings: &Settings) -> Result<JobSearchService, SearchError> {
    let client = BoardClient::new(settings.boards.endpoints(), settings.search.cache_ttl())?;
    let credentials = settings.credentials.resolve();
    log_missing_credentials(&credentials);

    build_service_with(settings, Arc::new(client), &credentials)
}

/// Like [`build_search_service`], with an explicit client and credentials.
pub fn build_service_with(
    settings: &Settings,
    client: Arc<BoardClient>,
    credentials: &SourceCredentials,
) -> Result<JobSearchService, SearchError> {
    let ranker = Ranker::new(settings.ranking.clone())?;
    let boards = settings.search.boards();
    let sources = build_sources(&boards, client, credentials, &settings.source_options());

    let fetcher = FanOutFetcher::new(sources, settings.search.fetch_policy());
    info!(
        boards = ?fetcher.source_names(),
        timeout_secs = settings.search.timeout_secs,
        retries = settings.search.retries,
        "Job search service ready"
    );

    Ok(JobSearchService::new(fetcher, ranker))
}

fn log_missing_credentials(credentials: &SourceCredentials) {
    let checks = [
        ("The Muse", credentials.muse.is_present(), credentials.muse.variable()),
        ("Adzuna", credentials.adzuna.is_present(), credentials.adzuna.variable()),
        ("Jooble", credentials.jooble.is_present(), credentials.jooble.variable()),
    ];

    for (board, present, variable) in checks {
        if !present {
            warn!(board, variable, "Credentials not set, board will be skipped");
        }
    }
}

//! One [`JobSource`] per job board.
//!
//! Every adapter follows the same shape: check credentials, fetch raw records
//! through the shared [`BoardClient`], map each record to a [`PostingDraft`],
//! filter client-side when the board has no text search, normalize and cap.

mod adzuna;
mod arbeitnow;
mod himalayas;
mod jobicy;
mod jooble;
mod muse;
mod remoteok;
mod remotive;

#[cfg(test)]
pub mod mock;

use std::sync::Arc;

use job_boards::{AdzunaCredentials, ApiKey, Board, BoardClient};
use tracing::debug;

use super::normalize::{normalize_posting, strip_html};
use super::traits::{JobSource, Result, SearchError};
use super::types::{Job, PostingDraft};

pub use adzuna::AdzunaSource;
pub use arbeitnow::ArbeitnowSource;
pub use himalayas::HimalayasSource;
pub use jobicy::JobicySource;
pub use jooble::JoobleSource;
pub use muse::MuseSource;
pub use remoteok::RemoteOkSource;
pub use remotive::RemotiveSource;

pub const DEFAULT_PER_SOURCE_CAP: usize = 20;
pub const DEFAULT_SCAN_PAGE_SIZE: usize = 50;
pub const DEFAULT_ADZUNA_COUNTRY: &str = "us";

/// Shared knobs for all adapters.
#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// Most jobs a single source contributes to one search.
    pub per_source_cap: usize,
    /// How many postings to pull from boards that are filtered client-side.
    pub scan_page_size: usize,
    pub adzuna_country: String,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            per_source_cap: DEFAULT_PER_SOURCE_CAP,
            scan_page_size: DEFAULT_SCAN_PAGE_SIZE,
            adzuna_country: DEFAULT_ADZUNA_COUNTRY.to_string(),
        }
    }
}

/// A secret looked up from the environment, remembering which variable was consulted.
#[derive(Debug, Clone)]
pub struct Credential<T> {
    value: Option<T>,
    variable: String,
}

impl<T> Credential<T> {
    pub fn present(value: T, variable: impl Into<String>) -> Self {
        Self {
            value: Some(value),
            variable: variable.into(),
        }
    }

    pub fn missing(variable: impl Into<String>) -> Self {
        Self {
            value: None,
            variable: variable.into(),
        }
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// The credential, or [`SearchError::MissingCredentials`] naming the variable.
    pub fn require(&self, board: Board) -> Result<&T> {
        self.value
            .as_ref()
            .ok_or_else(|| SearchError::MissingCredentials {
                board: board.to_string(),
                variable: self.variable.clone(),
            })
    }
}

/// Credentials for the boards that need them.
#[derive(Debug, Clone)]
pub struct SourceCredentials {
    pub muse: Credential<ApiKey>,
    pub adzuna: Credential<AdzunaCredentials>,
    pub jooble: Credential<ApiKey>,
}

impl Default for SourceCredentials {
    /// Nothing configured.
    fn default() -> Self {
        Self {
            muse: Credential::missing("THE_MUSE_API_KEY"),
            adzuna: Credential::missing("ADZUNA_APP_ID"),
            jooble: Credential::missing("JOOBLE_API_KEY"),
        }
    }
}

/// Build the adapters for `boards`, in the given order.
pub fn build_sources(
    boards: &[Board],
    client: Arc<BoardClient>,
    credentials: &SourceCredentials,
    options: &SourceOptions,
) -> Vec<Arc<dyn JobSource>> {
    boards
        .iter()
        .map(|board| -> Arc<dyn JobSource> {
            let client = Arc::clone(&client);
            let options = options.clone();
            match board {
                Board::Remotive => Arc::new(RemotiveSource::new(client, options)),
                Board::Jobicy => Arc::new(JobicySource::new(client, options)),
                Board::Arbeitnow => Arc::new(ArbeitnowSource::new(client, options)),
                Board::TheMuse => Arc::new(MuseSource::new(
                    client,
                    credentials.muse.clone(),
                    options,
                )),
                Board::Adzuna => Arc::new(AdzunaSource::new(
                    client,
                    credentials.adzuna.clone(),
                    options,
                )),
                Board::RemoteOk => Arc::new(RemoteOkSource::new(client, options)),
                Board::Himalayas => Arc::new(HimalayasSource::new(client, options)),
                Board::Jooble => Arc::new(JoobleSource::new(
                    client,
                    credentials.jooble.clone(),
                    options,
                )),
            }
        })
        .collect()
}

/// Which draft fields a client-side query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClientFilter {
    /// The board searched already.
    None,
    /// Title, company and description.
    Text,
    /// Text plus tags.
    TextAndTags,
}

impl ClientFilter {
    /// `query` must already be trimmed and lowercased. An empty query matches everything.
    fn matches(self, draft: &PostingDraft, query: &str) -> bool {
        if self == ClientFilter::None || query.is_empty() {
            return true;
        }

        let contains = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|value| value.to_lowercase().contains(query))
        };

        // Markup is not text; match the full stripped description, not the summary.
        let description_matches = draft
            .description
            .as_deref()
            .is_some_and(|raw| strip_html(raw).to_lowercase().contains(query));

        contains(&draft.title)
            || contains(&draft.company)
            || description_matches
            || (self == ClientFilter::TextAndTags
                && draft
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(query)))
    }
}

/// Filter, normalize and cap the drafts of one board.
pub(crate) fn into_jobs(
    board: Board,
    drafts: impl IntoIterator<Item = PostingDraft>,
    filter: ClientFilter,
    query: &str,
    cap: usize,
) -> Vec<Job> {
    let query = query.trim().to_lowercase();

    let jobs: Vec<Job> = drafts
        .into_iter()
        .filter(|draft| filter.matches(draft, &query))
        .filter_map(|draft| normalize_posting(board, draft))
        .take(cap)
        .collect();

    debug!(board = %board, count = jobs.len(), "Normalized postings");
    jobs
}

//! Trait definitions for search domain abstractions.

use async_trait::async_trait;
use job_boards::BoardFetchError;

use super::types::Job;

/// Error type for search operations.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Source fetch error: {0}")]
    SourceError(String),

    #[error("Source rejected the request: {0}")]
    Rejected(String),

    #[error("Missing credentials for {board}: {variable} is not set")]
    MissingCredentials { board: String, variable: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    Other(String),
}

impl SearchError {
    /// Transient failures worth another attempt. Rejections and missing
    /// credentials will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SearchError::SourceError(_) | SearchError::Other(_))
    }
}

impl From<BoardFetchError> for SearchError {
    fn from(e: BoardFetchError) -> Self {
        match e {
            BoardFetchError::Status(code) if code >= 500 || code == 429 => {
                SearchError::SourceError(e.to_string())
            }
            BoardFetchError::ResponseError(_) => SearchError::SourceError(e.to_string()),
            BoardFetchError::Client(_) => SearchError::ConfigError(e.to_string()),
            BoardFetchError::Unauthorized
            | BoardFetchError::Status(_)
            | BoardFetchError::ParsingError(_) => SearchError::Rejected(e.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// A job board the pipeline can pull postings from.
///
/// Implementations may fail freely; the fan-out fetcher turns every error,
/// timeout and panic into an empty contribution and logs it.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Name used in logs and fetch reports.
    fn name(&self) -> &str;

    /// Fetch postings for the query, normalized and capped.
    ///
    /// An empty query means "latest postings".
    async fn fetch(&self, query: &str) -> Result<Vec<Job>>;
}

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::{Board, BoardFetchError, BoardURL};

/// Upstream responses are reused for this long unless configured otherwise.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const CACHE_CAPACITY: u64 = 256;
const USER_AGENT: &str = concat!("job-boards/", env!("CARGO_PKG_VERSION"));

/// Base URL per board. Defaults to the public production hosts.
#[derive(Debug, Clone)]
pub struct BoardEndpoints {
    base_urls: HashMap<Board, String>,
}

impl Default for BoardEndpoints {
    fn default() -> Self {
        Self {
            base_urls: Board::all()
                .into_iter()
                .map(|board| (board, board.default_base_url().to_string()))
                .collect(),
        }
    }
}

impl BoardEndpoints {
    pub fn with_base_url(mut self, board: Board, base_url: impl Into<String>) -> Self {
        self.base_urls.insert(board, base_url.into());
        self
    }

    /// Point every board at the same host. Handy for tests against a single mock server.
    pub fn all_at(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_urls: Board::all()
                .into_iter()
                .map(|board| (board, base_url.clone()))
                .collect(),
        }
    }

    pub fn base_url(&self, board: Board) -> BoardURL {
        BoardURL::new(
            self.base_urls
                .get(&board)
                .map(String::as_str)
                .unwrap_or_else(|| board.default_base_url()),
        )
    }
}

/// HTTP client shared by all board requests.
///
/// Successful response bodies are cached in-process for the freshness window,
/// keyed by request URL (and body, for POST requests). Failed or unparsable
/// responses are never cached.
#[derive(Clone)]
pub struct BoardClient {
    http: reqwest::Client,
    cache: Cache<String, Arc<String>>,
    endpoints: BoardEndpoints,
}

impl BoardClient {
    pub fn new(endpoints: BoardEndpoints, cache_ttl: Duration) -> Result<Self, BoardFetchError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BoardFetchError::Client(e.to_string()))?;

        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(cache_ttl)
            .build();

        Ok(Self {
            http,
            cache,
            endpoints,
        })
    }

    pub fn with_defaults() -> Result<Self, BoardFetchError> {
        Self::new(BoardEndpoints::default(), DEFAULT_CACHE_TTL)
    }

    pub(crate) fn endpoint(&self, board: Board) -> BoardURL {
        self.endpoints.base_url(board)
    }

    /// Number of responses currently held in the cache.
    pub fn cached_responses(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        board: Board,
        url: impl AsRef<str>,
    ) -> Result<T, BoardFetchError> {
        let url = url.as_ref();

        if let Some(body) = self.cache.get(url) {
            debug!(board = %board, "Serving cached response");
            return parse_body(&body);
        }

        let resp = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| BoardFetchError::ResponseError(e.to_string()))?;

        let body = read_body(resp).await?;
        let parsed = parse_body(&body)?;
        self.cache.insert(url.to_string(), Arc::new(body));

        Ok(parsed)
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        board: Board,
        url: impl AsRef<str>,
        payload: &B,
    ) -> Result<T, BoardFetchError> {
        let url = url.as_ref();
        let payload = serde_json::to_string(payload).map_err(|e| {
            BoardFetchError::ParsingError(format!("Failed to encode request body: {}", e))
        })?;
        let cache_key = format!("POST {} {}", url, payload);

        if let Some(body) = self.cache.get(&cache_key) {
            debug!(board = %board, "Serving cached response");
            return parse_body(&body);
        }

        let resp = self
            .http
            .post(url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| BoardFetchError::ResponseError(e.to_string()))?;

        let body = read_body(resp).await?;
        let parsed = parse_body(&body)?;
        self.cache.insert(cache_key, Arc::new(body));

        Ok(parsed)
    }
}

async fn read_body(resp: reqwest::Response) -> Result<String, BoardFetchError> {
    let status = resp.status();
    if status == 401 || status == 403 {
        return Err(BoardFetchError::Unauthorized);
    }
    if !status.is_success() {
        return Err(BoardFetchError::Status(status.as_u16()));
    }

    resp.text()
        .await
        .map_err(|e| BoardFetchError::ResponseError(e.to_string()))
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, BoardFetchError> {
    serde_json::from_str(body).map_err(|e| {
        BoardFetchError::ParsingError(format!("Failed to parse response as JSON: {}", e))
    })
}

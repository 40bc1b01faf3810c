//! Multi-board job search.
//!
//! A search fans out to every configured job board at once, then runs the
//! merged postings through three pure stages:
//!
//! - **Filter** - caller-supplied category and location constraints
//! - **Dedup** - one posting per `title|company`, first one wins
//! - **Rank** - weighted relevance score, or newest first for an empty query
//!
//! # Architecture
//!
//! - [`JobSource`] - one adapter per board (Remotive, Jobicy, Arbeitnow,
//!   The Muse, Adzuna, Remote OK, Himalayas, Jooble)
//! - [`FanOutFetcher`] - runs sources concurrently and absorbs their failures
//! - [`JobSearchService`] - the pipeline entry point
//!
//! # Example
//!
//! ```ignore
//! use job_search::domain::search::{build_sources, FanOutFetcher, FetchPolicy, JobSearchService};
//!
//! let sources = build_sources(&Board::all(), client, &credentials, &SourceOptions::default());
//! let fetcher = FanOutFetcher::new(sources, FetchPolicy::default());
//! let service = JobSearchService::with_defaults(fetcher);
//!
//! let jobs = service.search_jobs("product manager", None).await;
//! ```
//!
//! Sources never fail a search: errors, timeouts and panics are logged and the
//! source simply contributes no jobs.

mod dedup;
mod fetcher;
mod filter;
mod normalize;
mod ranker;
mod service;
mod traits;
mod types;

pub mod source;

pub use dedup::{deduplicate, identity_key};
pub use fetcher::{FanOutFetcher, FetchPolicy, DEFAULT_SOURCE_TIMEOUT};
pub use filter::apply_filters;
pub use normalize::{normalize_posting, strip_html, NO_DESCRIPTION, RECENTLY};
pub use ranker::{freshness_score, Ranker, RankingConfig, ScoreBreakdown, SpecialtyCategory};
pub use service::JobSearchService;
pub use source::{build_sources, Credential, SourceCredentials, SourceOptions};
pub use traits::{JobSource, Result, SearchError};
pub use types::{
    EmptyReason, FetchReport, Job, PostedAt, PostingDraft, SearchFilters, SourceOutcome,
    SourceStatus,
};

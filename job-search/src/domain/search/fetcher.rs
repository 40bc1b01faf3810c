//! Concurrent fan-out over every configured job source.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::{debug, warn};

use super::traits::{JobSource, SearchError};
use super::types::{FetchReport, Job, SourceOutcome, SourceStatus};

pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(10);

/// Applied identically to every source.
#[derive(Debug, Clone, Copy)]
pub struct FetchPolicy {
    /// Per attempt.
    pub timeout: Duration,
    /// Extra attempts after a timeout or a retryable error.
    pub retries: u32,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_SOURCE_TIMEOUT,
            retries: 0,
        }
    }
}

/// Runs all sources at once and waits for every one of them to settle.
///
/// A source that errors, times out or panics contributes nothing and is
/// recorded in the [`FetchReport`]; it never affects the others.
pub struct FanOutFetcher {
    sources: Vec<Arc<dyn JobSource>>,
    policy: FetchPolicy,
}

impl FanOutFetcher {
    pub fn new(sources: Vec<Arc<dyn JobSource>>, policy: FetchPolicy) -> Self {
        Self { sources, policy }
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Jobs are merged in source declaration order, not completion order.
    pub async fn fetch_all(&self, query: &str) -> FetchReport {
        let started = Instant::now();

        let handles = self
            .sources
            .iter()
            .map(|source| {
                let source = Arc::clone(source);
                let query = query.to_string();
                let policy = self.policy;
                tokio::spawn(async move { settle(source.as_ref(), &query, policy).await })
            })
            .collect::<Vec<_>>();

        let settled = join_all(handles).await;

        let mut report = FetchReport::default();
        for (source, result) in self.sources.iter().zip(settled) {
            let (status, jobs, elapsed) = match result {
                Ok(settled) => settled,
                Err(e) => {
                    warn!(source = source.name(), error = %e, "Job source task aborted");
                    let status = SourceStatus::Failed {
                        reason: if e.is_panic() {
                            "source panicked".to_string()
                        } else {
                            e.to_string()
                        },
                    };
                    (status, Vec::new(), started.elapsed())
                }
            };

            report.jobs.extend(jobs);
            report.outcomes.push(SourceOutcome {
                source: source.name().to_string(),
                status,
                elapsed,
            });
        }

        debug!(
            sources = report.outcomes.len(),
            succeeded = report.succeeded(),
            jobs = report.jobs.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fan-out settled"
        );

        report
    }
}

async fn settle(
    source: &dyn JobSource,
    query: &str,
    policy: FetchPolicy,
) -> (SourceStatus, Vec<Job>, Duration) {
    let started = Instant::now();
    let mut attempt = 0;

    loop {
        attempt += 1;
        let can_retry = attempt <= policy.retries;

        match tokio::time::timeout(policy.timeout, source.fetch(query)).await {
            Ok(Ok(jobs)) => {
                debug!(
                    source = source.name(),
                    count = jobs.len(),
                    attempt,
                    "Job source succeeded"
                );
                let status = SourceStatus::Succeeded { count: jobs.len() };
                return (status, jobs, started.elapsed());
            }
            Ok(Err(e @ SearchError::MissingCredentials { .. })) => {
                warn!(source = source.name(), "Skipping job source: {}", e);
                let status = SourceStatus::Skipped {
                    reason: e.to_string(),
                };
                return (status, Vec::new(), started.elapsed());
            }
            Ok(Err(e)) if e.is_retryable() && can_retry => {
                warn!(source = source.name(), attempt, error = %e, "Job source failed, retrying");
            }
            Ok(Err(e)) => {
                warn!(source = source.name(), attempt, error = %e, "Job source failed");
                let status = SourceStatus::Failed {
                    reason: e.to_string(),
                };
                return (status, Vec::new(), started.elapsed());
            }
            Err(_) if can_retry => {
                warn!(
                    source = source.name(),
                    attempt,
                    timeout_ms = policy.timeout.as_millis() as u64,
                    "Job source timed out, retrying"
                );
            }
            Err(_) => {
                warn!(
                    source = source.name(),
                    attempt,
                    timeout_ms = policy.timeout.as_millis() as u64,
                    "Job source timed out"
                );
                return (SourceStatus::TimedOut, Vec::new(), started.elapsed());
            }
        }
    }
}

//! Mock job source for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::search::traits::{JobSource, Result, SearchError};
use crate::domain::search::types::Job;

#[derive(Clone)]
enum Behavior {
    Return(Vec<Job>),
    Fail(fn(String) -> SearchError, String),
    /// Fails this many times with a retryable error, then returns the jobs
    FailTimes(usize, Vec<Job>),
    Hang,
    Panic,
}

/// Job source with scripted behavior.
///
/// ```ignore
/// let source = MockJobSource::returning("Remotive", vec![job])
///     .with_delay(Duration::from_millis(50));
/// let broken = MockJobSource::failing("Jobicy", SearchError::SourceError, "503");
/// ```
#[derive(Clone)]
pub struct MockJobSource {
    name: String,
    behavior: Behavior,
    delay: Option<Duration>,
    call_count: Arc<AtomicUsize>,
}

impl MockJobSource {
    fn with_behavior(name: &str, behavior: Behavior) -> Self {
        Self {
            name: name.to_string(),
            behavior,
            delay: None,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn returning(name: &str, jobs: Vec<Job>) -> Self {
        Self::with_behavior(name, Behavior::Return(jobs))
    }

    pub fn failing(name: &str, error: fn(String) -> SearchError, message: &str) -> Self {
        Self::with_behavior(name, Behavior::Fail(error, message.to_string()))
    }

    pub fn flaky(name: &str, failures: usize, jobs: Vec<Job>) -> Self {
        Self::with_behavior(name, Behavior::FailTimes(failures, jobs))
    }

    pub fn hanging(name: &str) -> Self {
        Self::with_behavior(name, Behavior::Hang)
    }

    pub fn panicking(name: &str) -> Self {
        Self::with_behavior(name, Behavior::Panic)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JobSource for MockJobSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, _query: &str) -> Result<Vec<Job>> {
        let attempt = self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behavior {
            Behavior::Return(jobs) => Ok(jobs.clone()),
            Behavior::Fail(error, message) => Err(error(message.clone())),
            Behavior::FailTimes(failures, _) if attempt < *failures => Err(
                SearchError::SourceError(format!("attempt {} failed", attempt + 1)),
            ),
            Behavior::FailTimes(_, jobs) => Ok(jobs.clone()),
            Behavior::Hang => std::future::pending().await,
            Behavior::Panic => panic!("{} blew up", self.name),
        }
    }
}

/// A minimal normalized job for pipeline tests.
pub fn sample_job(id: &str, title: &str, company: &str, board: &str) -> Job {
    Job {
        id: id.to_string(),
        title: title.to_string(),
        company: company.to_string(),
        location: "Remote".to_string(),
        salary: None,
        posted_date: "Recently".to_string(),
        description: "No description available.".to_string(),
        source_board: board.to_string(),
        tags: vec![],
        url: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_tracks_call_count() {
        let source = MockJobSource::returning("Test", vec![sample_job("t-1", "A", "B", "Test")]);

        assert_eq!(source.call_count(), 0);
        assert_eq!(source.fetch("rust").await.unwrap().len(), 1);
        source.fetch("rust").await.unwrap();
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn flaky_mock_recovers() {
        let source = MockJobSource::flaky("Test", 2, vec![sample_job("t-1", "A", "B", "Test")]);

        assert!(source.fetch("").await.is_err());
        assert!(source.fetch("").await.is_err());
        assert_eq!(source.fetch("").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failing_mock_uses_given_variant() {
        let source = MockJobSource::failing("Test", SearchError::Rejected, "401");
        assert!(matches!(
            source.fetch("").await,
            Err(SearchError::Rejected(m)) if m == "401"
        ));
    }
}

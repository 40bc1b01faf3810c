//! Core types for the job search domain.

use std::time::Duration;

use job_boards::Board;
use serde::{Deserialize, Serialize};
use strum::Display;
use time::Date;

use super::normalize::parse_posted_date;

/// A normalized job posting.
///
/// Built once by a source adapter and never mutated afterwards; the pipeline
/// stages only drop or reorder jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// `{board tag}-{provider id}`, unique across boards
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    /// `Mon D, YYYY`, or `Recently` when the board gave no usable timestamp
    pub posted_date: String,
    /// Plain text, at most 300 characters plus an ellipsis
    pub description: String,
    /// Display name of the board the posting came from
    pub source_board: String,
    pub tags: Vec<String>,
    /// Link as reported by the board; may be empty or malformed
    pub url: String,
}

impl Job {
    pub fn board(&self) -> Option<Board> {
        Board::from_name(&self.source_board)
    }

    pub fn posted_on(&self) -> Option<Date> {
        parse_posted_date(&self.posted_date)
    }

    /// The posting link if it is an absolute http(s) URL, otherwise the board homepage.
    pub fn posting_url(&self) -> Option<String> {
        let url = self.url.trim();
        match url::Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Some(url.to_string()),
            _ => self.board().map(|board| board.homepage().to_string()),
        }
    }
}

/// When a board stamped a posting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PostedAt {
    /// ISO 8601 date or date-time, with or without offset
    Iso(String),
    /// Seconds since the UNIX epoch
    Unix(i64),
    #[default]
    Unknown,
}

/// Board-specific fields pulled out of a raw record, before normalization.
#[derive(Debug, Clone, Default)]
pub struct PostingDraft {
    pub native_id: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub posted_at: PostedAt,
    /// May contain HTML
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub url: Option<String>,
}

/// Caller-supplied filters.
///
/// Values are OR-combined within a field and fields are AND-combined.
/// Missing or empty fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default)]
    pub category: Option<Vec<String>>,
    #[serde(default)]
    pub location: Option<Vec<String>>,
    /// Accepted but not applied: no job carries an experience level.
    #[serde(default)]
    pub experience_level: Option<Vec<String>>,
}

impl SearchFilters {
    pub fn with_category(mut self, values: &[&str]) -> Self {
        self.category = Some(values.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn with_location(mut self, values: &[&str]) -> Self {
        self.location = Some(values.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn with_experience_level(mut self, values: &[&str]) -> Self {
        self.experience_level = Some(values.iter().map(|v| v.to_string()).collect());
        self
    }
}

/// How a single source settled during fan-out.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceStatus {
    Succeeded { count: usize },
    /// Not attempted, e.g. missing credentials
    Skipped { reason: String },
    Failed { reason: String },
    TimedOut,
}

#[derive(Debug, Clone)]
pub struct SourceOutcome {
    pub source: String,
    pub status: SourceStatus,
    pub elapsed: Duration,
}

/// Why a fan-out produced no jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EmptyReason {
    #[strum(serialize = "no data found")]
    NoDataFound,
    #[strum(serialize = "all sources degraded")]
    AllSourcesDegraded,
}

/// Merged jobs in source declaration order plus one outcome per source.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    pub jobs: Vec<Job>,
    pub outcomes: Vec<SourceOutcome>,
}

impl FetchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, SourceStatus::Succeeded { .. }))
            .count()
    }

    pub fn degraded(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// `None` when at least one job was fetched.
    pub fn empty_reason(&self) -> Option<EmptyReason> {
        if !self.jobs.is_empty() {
            None
        } else if self.succeeded() > 0 {
            Some(EmptyReason::NoDataFound)
        } else {
            Some(EmptyReason::AllSourcesDegraded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_with(board: &str, url: &str) -> Job {
        Job {
            id: "x-1".into(),
            title: "Engineer".into(),
            company: "Acme".into(),
            location: "Remote".into(),
            salary: None,
            posted_date: "Recently".into(),
            description: "No description available.".into(),
            source_board: board.into(),
            tags: vec![],
            url: url.into(),
        }
    }

    fn outcome(status: SourceStatus) -> SourceOutcome {
        SourceOutcome {
            source: "Test".into(),
            status,
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn posting_url_falls_back_to_homepage() {
        let valid = job_with("Remotive", "https://remotive.com/remote-jobs/1");
        assert_eq!(
            valid.posting_url().as_deref(),
            Some("https://remotive.com/remote-jobs/1")
        );

        let malformed = job_with("The Muse", "/jobs/relative");
        assert_eq!(
            malformed.posting_url().as_deref(),
            Some("https://www.themuse.com/jobs")
        );

        let not_http = job_with("Adzuna", "javascript:alert(1)");
        assert_eq!(
            not_http.posting_url().as_deref(),
            Some("https://www.adzuna.com/jobs")
        );

        let unknown = job_with("Mock Jobs", "");
        assert!(unknown.posting_url().is_none());
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_value(job_with("Jobicy", "")).unwrap();
        assert_eq!(json["sourceBoard"], "Jobicy");
        assert_eq!(json["postedDate"], "Recently");
        assert!(json.get("salary").is_none());
    }

    #[test]
    fn filters_deserialize_from_camel_case() {
        let filters: SearchFilters =
            serde_json::from_str(r#"{"experienceLevel": ["Senior"], "location": ["Berlin"]}"#)
                .unwrap();
        assert_eq!(filters.location, Some(vec!["Berlin".to_string()]));
        assert_eq!(filters.experience_level, Some(vec!["Senior".to_string()]));
        assert!(filters.category.is_none());
    }

    #[test]
    fn empty_reason_distinguishes_degraded_from_no_data() {
        let mut report = FetchReport {
            jobs: vec![],
            outcomes: vec![
                outcome(SourceStatus::Succeeded { count: 0 }),
                outcome(SourceStatus::TimedOut),
            ],
        };
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.degraded(), 1);
        assert_eq!(report.empty_reason(), Some(EmptyReason::NoDataFound));

        report.outcomes[0].status = SourceStatus::Failed {
            reason: "boom".into(),
        };
        assert_eq!(
            report.empty_reason(),
            Some(EmptyReason::AllSourcesDegraded)
        );
        assert_eq!(
            EmptyReason::AllSourcesDegraded.to_string(),
            "all sources degraded"
        );

        report.jobs.push(job_with("Jobicy", ""));
        assert_eq!(report.empty_reason(), None);
    }
}

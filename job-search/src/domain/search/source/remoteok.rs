use std::sync::Arc;

use async_trait::async_trait;
use job_boards::domain::RawRemoteOkJob;
use job_boards::{Board, BoardClient};

use super::{into_jobs, ClientFilter, SourceOptions};
use crate::domain::search::normalize::format_salary_range;
use crate::domain::search::traits::{JobSource, Result};
use crate::domain::search::types::{Job, PostedAt, PostingDraft};

/// Remote OK serves its whole feed at once; the query is matched client-side.
pub struct RemoteOkSource {
    client: Arc<BoardClient>,
    options: SourceOptions,
}

impl RemoteOkSource {
    pub fn new(client: Arc<BoardClient>, options: SourceOptions) -> Self {
        Self { client, options }
    }
}

#[async_trait]
impl JobSource for RemoteOkSource {
    fn name(&self) -> &str {
        Board::RemoteOk.name()
    }

    async fn fetch(&self, query: &str) -> Result<Vec<Job>> {
        let raw = self.client.fetch_remoteok().await?;

        Ok(into_jobs(
            Board::RemoteOk,
            raw.into_iter().map(to_draft),
            ClientFilter::TextAndTags,
            query,
            self.options.per_source_cap,
        ))
    }
}

fn to_draft(raw: RawRemoteOkJob) -> PostingDraft {
    let posted_at = match (raw.epoch, raw.date) {
        (Some(epoch), _) => PostedAt::Unix(epoch),
        (None, Some(date)) => PostedAt::Iso(date),
        (None, None) => PostedAt::Unknown,
    };

    PostingDraft {
        native_id: raw.id.to_string(),
        title: raw.position,
        company: raw.company,
        location: raw.location,
        salary: format_salary_range(raw.salary_min, raw.salary_max, None),
        posted_at,
        description: raw.description,
        tags: raw.tags,
        url: raw.url.or(raw.apply_url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::normalize::normalize_posting;
    use job_boards::{BoardEndpoints, DEFAULT_CACHE_TTL};
    use serde_json::json;

    #[test]
    fn maps_remoteok_record() {
        let raw: RawRemoteOkJob = serde_json::from_value(json!({
            "id": "1129853",
            "slug": "remote-staff-engineer-acme-1129853",
            "epoch": 1_790_000_000,
            "date": "2020-01-01T00:00:00+00:00",
            "company": "Acme",
            "position": "Staff Engineer",
            "tags": ["rust", "", "backend"],
            "description": "<p>Staff level</p>",
            "location": "",
            "salary_min": 0,
            "salary_max": 180_000,
            "url": "https://remoteOK.com/remote-jobs/remote-staff-engineer-acme-1129853"
        }))
        .unwrap();

        let job = normalize_posting(Board::RemoteOk, to_draft(raw)).unwrap();
        assert_eq!(job.id, "remoteok-1129853");
        assert_eq!(job.title, "Staff Engineer");
        assert_eq!(job.location, "Remote");
        assert_eq!(job.posted_date, "Sep 21, 2026");
        assert!(job.salary.is_none());
        assert_eq!(job.tags, vec!["rust", "backend"]);
        assert_eq!(job.source_board, "Remote OK");
    }

    #[test]
    fn falls_back_to_date_string() {
        let raw: RawRemoteOkJob =
            serde_json::from_value(json!({"id": 5, "date": "2026-08-30T10:00:00+00:00"})).unwrap();
        assert_eq!(
            to_draft(raw).posted_at,
            PostedAt::Iso("2026-08-30T10:00:00+00:00".to_string())
        );
    }

    #[tokio::test]
    async fn skips_legal_notice_and_filters_by_tag() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api")
            .with_status(200)
            .with_body(
                json!([
                    {"last_updated": 1_790_000_000, "legal": "API terms of service"},
                    {"id": 1, "position": "Engineer", "tags": ["golang"]},
                    {"id": 2, "position": "Engineer", "tags": ["ruby"]}
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let client = Arc::new(
            BoardClient::new(BoardEndpoints::all_at(server.url()), DEFAULT_CACHE_TTL).unwrap(),
        );
        let jobs = RemoteOkSource::new(client, SourceOptions::default())
            .fetch("GoLang")
            .await
            .unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "remoteok-1");
    }
}

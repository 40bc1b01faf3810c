use std::sync::Arc;

use async_trait::async_trait;
use job_boards::domain::RawJoobleJob;
use job_boards::{ApiKey, Board, BoardClient};

use super::{into_jobs, ClientFilter, Credential, SourceOptions};
use crate::domain::search::traits::{JobSource, Result};
use crate::domain::search::types::{Job, PostedAt, PostingDraft};

/// Jooble aggregates other boards and searches server-side over POST.
pub struct JoobleSource {
    client: Arc<BoardClient>,
    api_key: Credential<ApiKey>,
    options: SourceOptions,
}

impl JoobleSource {
    pub fn new(
        client: Arc<BoardClient>,
        api_key: Credential<ApiKey>,
        options: SourceOptions,
    ) -> Self {
        Self {
            client,
            api_key,
            options,
        }
    }
}

#[async_trait]
impl JobSource for JoobleSource {
    fn name(&self) -> &str {
        Board::Jooble.name()
    }

    async fn fetch(&self, query: &str) -> Result<Vec<Job>> {
        let api_key = self.api_key.require(Board::Jooble)?;
        let query = query.trim();
        let raw = self.client.fetch_jooble(api_key, query).await?;

        Ok(into_jobs(
            Board::Jooble,
            raw.into_iter().map(to_draft),
            ClientFilter::None,
            query,
            self.options.per_source_cap,
        ))
    }
}

fn to_draft(raw: RawJoobleJob) -> PostingDraft {
    PostingDraft {
        native_id: raw.id.to_string(),
        title: raw.title,
        company: raw.company,
        location: raw.location,
        salary: raw.salary,
        posted_at: raw.updated.map(PostedAt::Iso).unwrap_or_default(),
        description: raw.snippet,
        tags: raw.job_type.into_iter().collect(),
        url: raw.link,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::normalize::normalize_posting;
    use job_boards::{BoardEndpoints, DEFAULT_CACHE_TTL};
    use mockito::Matcher;
    use serde_json::json;

    #[test]
    fn maps_jooble_record() {
        let raw: RawJoobleJob = serde_json::from_value(json!({
            "id": -4_212_345_678_901_234_i64,
            "title": "Backend Engineer",
            "location": "Austin, TX",
            "snippet": "&nbsp;...build <b>APIs</b>...&nbsp;",
            "salary": "",
            "source": "indeed.com",
            "type": "Full-time",
            "link": "https://jooble.org/desc/-4212345678901234",
            "company": "Acme",
            "updated": "2026-10-04T00:00:00.0000000"
        }))
        .unwrap();

        let job = normalize_posting(Board::Jooble, to_draft(raw)).unwrap();
        assert_eq!(job.id, "jooble--4212345678901234");
        assert!(job.salary.is_none());
        assert_eq!(job.posted_date, "Oct 4, 2026");
        assert_eq!(job.description, "...build APIs......");
        assert_eq!(job.tags, vec!["Full-time"]);
    }

    #[tokio::test]
    async fn posts_keywords_with_key_in_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/jooble-key")
            .match_body(Matcher::Json(json!({"keywords": "backend engineer"})))
            .with_status(200)
            .with_body(
                json!({"totalCount": 1, "jobs": [{"id": 1, "title": "Backend Engineer"}]})
                    .to_string(),
            )
            .create_async()
            .await;

        let client = Arc::new(
            BoardClient::new(BoardEndpoints::all_at(server.url()), DEFAULT_CACHE_TTL).unwrap(),
        );
        let source = JoobleSource::new(
            client,
            Credential::present(ApiKey::new("jooble-key"), "JOOBLE_API_KEY"),
            SourceOptions::default(),
        );

        let jobs = source.fetch("backend engineer").await.unwrap();
        mock.assert_async().await;
        assert_eq!(jobs[0].id, "jooble-1");
    }
}

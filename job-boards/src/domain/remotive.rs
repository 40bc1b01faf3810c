use serde::Deserialize;
use serde_json::Value;

use crate::records::lenient;
use crate::{decode_records, Board, BoardClient, BoardFetchError, RawId};

#[derive(Debug, Default, Deserialize)]
pub struct RemotiveResponse {
    #[serde(default)]
    jobs: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRemotiveJob {
    pub id: RawId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub job_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub publication_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub candidate_required_location: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub salary: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
}

impl BoardClient {
    /// Remotive searches natively. Without a query the latest `limit` postings are returned.
    pub async fn fetch_remotive(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RawRemotiveJob>, BoardFetchError> {
        let base = self
            .endpoint(Board::Remotive)
            .append_path("api/remote-jobs");
        let url = if query.is_empty() {
            base.with_param("limit", limit.to_string())
        } else {
            base.with_param("search", query)
        };

        let response: RemotiveResponse = self.fetch(Board::Remotive, url).await?;
        Ok(decode_records(
            Board::Remotive,
            response.jobs.unwrap_or_default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoardEndpoints;
    use mockito::Matcher;

    #[tokio::test]
    async fn sends_search_param_and_decodes_jobs() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/remote-jobs")
            .match_query(Matcher::UrlEncoded("search".into(), "rust developer".into()))
            .with_status(200)
            .with_body(
                r#"{"job-count": 2, "jobs": [
                    {"id": 101, "title": "Rust Developer", "company_name": "Ferris Inc",
                     "tags": ["rust", "backend"], "publication_date": "2026-10-01T09:00:00",
                     "candidate_required_location": "Worldwide", "salary": "",
                     "description": "<p>Write Rust</p>", "url": "https://remotive.com/jobs/101"},
                    {"title": "no id"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = BoardClient::new(
            BoardEndpoints::default().with_base_url(Board::Remotive, server.url()),
            crate::DEFAULT_CACHE_TTL,
        )
        .unwrap();

        let jobs = client.fetch_remotive("rust developer", 20).await.unwrap();
        mock.assert_async().await;

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, RawId::Number(101));
        assert_eq!(jobs[0].company_name.as_deref(), Some("Ferris Inc"));
        assert_eq!(jobs[0].tags, vec!["rust", "backend"]);
    }

    #[tokio::test]
    async fn empty_query_asks_for_latest() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/remote-jobs")
            .match_query(Matcher::UrlEncoded("limit".into(), "20".into()))
            .with_status(200)
            .with_body(r#"{"jobs": null}"#)
            .create_async()
            .await;

        let client = BoardClient::new(
            BoardEndpoints::all_at(server.url()),
            crate::DEFAULT_CACHE_TTL,
        )
        .unwrap();

        let jobs = client.fetch_remotive("", 20).await.unwrap();
        mock.assert_async().await;
        assert!(jobs.is_empty());
    }
}

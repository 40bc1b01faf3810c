use serde::Deserialize;
use serde_json::Value;

use crate::records::lenient;
use crate::{decode_records, ApiKey, Board, BoardClient, BoardFetchError, RawId};

#[derive(Debug, Default, Deserialize)]
pub struct MuseResponse {
    #[serde(default)]
    results: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MuseNamed {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MuseRefs {
    #[serde(default, deserialize_with = "lenient::string")]
    pub landing_page: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMuseJob {
    pub id: RawId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    /// HTML body of the posting.
    #[serde(default, deserialize_with = "lenient::string")]
    pub contents: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub publication_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub locations: Vec<MuseNamed>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub categories: Vec<MuseNamed>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub refs: Option<MuseRefs>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub company: Option<MuseNamed>,
}

impl BoardClient {
    /// Fetches the newest page of postings. The Muse has no keyword parameter.
    pub async fn fetch_muse(
        &self,
        api_key: &ApiKey,
        page: u32,
    ) -> Result<Vec<RawMuseJob>, BoardFetchError> {
        let url = self
            .endpoint(Board::TheMuse)
            .append_path("api/public/jobs")
            .with_param("page", page.to_string())
            .with_param("descending", "true")
            .with_param("api_key", api_key.expose());

        let response: MuseResponse = self.fetch(Board::TheMuse, url).await?;
        Ok(decode_records(
            Board::TheMuse,
            response.results.unwrap_or_default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoardEndpoints;
    use mockito::Matcher;

    #[tokio::test]
    async fn sends_api_key_and_tolerates_odd_nested_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/public/jobs")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "0".into()),
                Matcher::UrlEncoded("descending".into(), "true".into()),
                Matcher::UrlEncoded("api_key".into(), "muse-key".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"page": 0, "results": [
                    {"id": 9, "name": "Product Manager", "company": {"name": "Muse Co"},
                     "locations": [{"name": "New York, NY"}, 42],
                     "categories": [{"name": "Product Management"}],
                     "refs": "not-an-object",
                     "publication_date": "2026-10-01T12:00:00Z"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = BoardClient::new(
            BoardEndpoints::all_at(server.url()),
            crate::DEFAULT_CACHE_TTL,
        )
        .unwrap();

        let jobs = client.fetch_muse(&ApiKey::new("muse-key"), 0).await.unwrap();
        mock.assert_async().await;

        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.locations.len(), 1);
        assert_eq!(job.locations[0].name.as_deref(), Some("New York, NY"));
        assert!(job.refs.is_none());
        assert_eq!(
            job.company.as_ref().and_then(|c| c.name.as_deref()),
            Some("Muse Co")
        );
    }
}

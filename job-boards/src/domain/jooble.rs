use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::records::lenient;
use crate::{decode_records, ApiKey, Board, BoardClient, BoardFetchError, RawId};

#[derive(Debug, Serialize)]
struct JoobleRequest<'a> {
    keywords: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct JoobleResponse {
    #[serde(default)]
    jobs: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawJoobleJob {
    pub id: RawId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub snippet: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub salary: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub job_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub updated: Option<String>,
}

impl BoardClient {
    /// Jooble takes the API key as the last path segment and the search as a JSON body.
    pub async fn fetch_jooble(
        &self,
        api_key: &ApiKey,
        query: &str,
    ) -> Result<Vec<RawJoobleJob>, BoardFetchError> {
        let url = self
            .endpoint(Board::Jooble)
            .append_path(&format!("api/{}", urlencoding::encode(api_key.expose())));

        let response: JoobleResponse = self
            .post(Board::Jooble, url, &JoobleRequest { keywords: query })
            .await?;
        Ok(decode_records(Board::Jooble, response.jobs.unwrap_or_default()))
    }
}

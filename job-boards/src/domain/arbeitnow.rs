use serde::Deserialize;
use serde_json::Value;

use crate::records::lenient;
use crate::{decode_records, Board, BoardClient, BoardFetchError, RawId};

#[derive(Debug, Default, Deserialize)]
pub struct ArbeitnowResponse {
    #[serde(default)]
    data: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawArbeitnowJob {
    pub slug: RawId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub job_types: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: Option<String>,
    /// UNIX seconds.
    #[serde(default, deserialize_with = "lenient::i64")]
    pub created_at: Option<i64>,
}

impl BoardClient {
    pub async fn fetch_arbeitnow(&self) -> Result<Vec<RawArbeitnowJob>, BoardFetchError> {
        let url = self
            .endpoint(Board::Arbeitnow)
            .append_path("api/job-board-api");

        let response: ArbeitnowResponse = self.fetch(Board::Arbeitnow, url).await?;
        Ok(decode_records(
            Board::Arbeitnow,
            response.data.unwrap_or_default(),
        ))
    }
}

use serde::Deserialize;
use serde_json::Value;

use crate::records::lenient;
use crate::{decode_records, Board, BoardClient, BoardFetchError, RawId};

#[derive(Debug, Clone, Deserialize)]
pub struct RawRemoteOkJob {
    pub id: RawId,
    /// UNIX seconds.
    #[serde(default, deserialize_with = "lenient::i64")]
    pub epoch: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub salary_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub salary_max: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub apply_url: Option<String>,
}

impl BoardClient {
    /// Remote OK answers with a bare array whose first element is a legal notice
    /// rather than a posting; only elements carrying an `id` are decoded.
    pub async fn fetch_remoteok(&self) -> Result<Vec<RawRemoteOkJob>, BoardFetchError> {
        let url = self.endpoint(Board::RemoteOk).append_path("api");

        let response: Vec<Value> = self.fetch(Board::RemoteOk, url).await?;
        let postings = response
            .into_iter()
            .filter(|value| value.get("id").is_some())
            .collect();

        Ok(decode_records(Board::RemoteOk, postings))
    }
}

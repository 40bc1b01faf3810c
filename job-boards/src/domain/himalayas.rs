use serde::Deserialize;
use serde_json::Value;

use crate::records::lenient;
use crate::{decode_records, Board, BoardClient, BoardFetchError, RawId};

#[derive(Debug, Default, Deserialize)]
pub struct HimalayasResponse {
    #[serde(default)]
    jobs: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHimalayasJob {
    pub guid: RawId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub employment_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub min_salary: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub max_salary: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub seniority: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub location_restrictions: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    /// UNIX seconds.
    #[serde(default, deserialize_with = "lenient::i64")]
    pub pub_date: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub application_link: Option<String>,
}

impl BoardClient {
    pub async fn fetch_himalayas(
        &self,
        limit: usize,
    ) -> Result<Vec<RawHimalayasJob>, BoardFetchError> {
        let url = self
            .endpoint(Board::Himalayas)
            .append_path("jobs/api")
            .with_param("limit", limit.to_string());

        let response: HimalayasResponse = self.fetch(Board::Himalayas, url).await?;
        Ok(decode_records(
            Board::Himalayas,
            response.jobs.unwrap_or_default(),
        ))
    }
}

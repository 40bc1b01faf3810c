use serde::Deserialize;
use serde_json::Value;

use crate::records::lenient;
use crate::{decode_records, Board, BoardClient, BoardFetchError, RawId};

#[derive(Debug, Default, Deserialize)]
pub struct JobicyResponse {
    #[serde(default)]
    jobs: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJobicyJob {
    pub id: RawId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub job_industry: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub job_type: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub job_geo: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub job_level: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub job_excerpt: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub job_description: Option<String>,
    /// Formatted as `YYYY-MM-DD HH:MM:SS`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub pub_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub annual_salary_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub annual_salary_max: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub salary_currency: Option<String>,
}

impl BoardClient {
    /// Jobicy has no usable text search, so this returns the latest `count` postings.
    pub async fn fetch_jobicy(&self, count: usize) -> Result<Vec<RawJobicyJob>, BoardFetchError> {
        let url = self
            .endpoint(Board::Jobicy)
            .append_path("api/v2/remote-jobs")
            .with_param("count", count.to_string());

        let response: JobicyResponse = self.fetch(Board::Jobicy, url).await?;
        Ok(decode_records(Board::Jobicy, response.jobs.unwrap_or_default()))
    }
}

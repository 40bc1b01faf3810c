use serde::Deserialize;
use serde_json::Value;

use crate::records::lenient;
use crate::{decode_records, AdzunaCredentials, Board, BoardClient, BoardFetchError, RawId};

/// Adzuna needs a keyword; an empty query searches for this instead.
pub const ADZUNA_FALLBACK_QUERY: &str = "remote";

#[derive(Debug, Default, Deserialize)]
pub struct AdzunaResponse {
    #[serde(default)]
    results: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdzunaDisplayName {
    #[serde(default, deserialize_with = "lenient::string")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdzunaCategory {
    #[serde(default, deserialize_with = "lenient::string")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAdzunaJob {
    pub id: RawId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub created: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub redirect_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub salary_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub salary_max: Option<f64>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub company: Option<AdzunaDisplayName>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub location: Option<AdzunaDisplayName>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub category: Option<AdzunaCategory>,
}

impl BoardClient {
    pub async fn fetch_adzuna(
        &self,
        credentials: &AdzunaCredentials,
        country: &str,
        query: &str,
        results_per_page: usize,
    ) -> Result<Vec<RawAdzunaJob>, BoardFetchError> {
        let what = if query.is_empty() {
            ADZUNA_FALLBACK_QUERY
        } else {
            query
        };

        let url = self
            .endpoint(Board::Adzuna)
            .append_path(&format!("v1/api/jobs/{}/search/1", country))
            .with_param("app_id", &credentials.app_id)
            .with_param("app_key", credentials.app_key.expose())
            .with_param("results_per_page", results_per_page.to_string())
            .with_param("what", what);

        let response: AdzunaResponse = self.fetch(Board::Adzuna, url).await?;
        Ok(decode_records(
            Board::Adzuna,
            response.results.unwrap_or_default(),
        ))
    }
}

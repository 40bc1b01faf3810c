use std::sync::Arc;

use async_trait::async_trait;
use job_boards::domain::RawAdzunaJob;
use job_boards::{AdzunaCredentials, Board, BoardClient};

use super::{into_jobs, ClientFilter, Credential, SourceOptions};
use crate::domain::search::normalize::format_salary_range;
use crate::domain::search::traits::{JobSource, Result};
use crate::domain::search::types::{Job, PostedAt, PostingDraft};

/// Adzuna searches server-side within one country.
pub struct AdzunaSource {
    client: Arc<BoardClient>,
    credentials: Credential<AdzunaCredentials>,
    options: SourceOptions,
}

impl AdzunaSource {
    pub fn new(
        client: Arc<BoardClient>,
        credentials: Credential<AdzunaCredentials>,
        options: SourceOptions,
    ) -> Self {
        Self {
            client,
            credentials,
            options,
        }
    }
}

#[async_trait]
impl JobSource for AdzunaSource {
    fn name(&self) -> &str {
        Board::Adzuna.name()
    }

    async fn fetch(&self, query: &str) -> Result<Vec<Job>> {
        let credentials = self.credentials.require(Board::Adzuna)?;
        let query = query.trim();
        let raw = self
            .client
            .fetch_adzuna(
                credentials,
                &self.options.adzuna_country,
                query,
                self.options.per_source_cap,
            )
            .await?;

        Ok(into_jobs(
            Board::Adzuna,
            raw.into_iter().map(to_draft),
            ClientFilter::None,
            query,
            self.options.per_source_cap,
        ))
    }
}

fn to_draft(raw: RawAdzunaJob) -> PostingDraft {
    PostingDraft {
        native_id: raw.id.to_string(),
        title: raw.title,
        company: raw.company.and_then(|c| c.display_name),
        location: raw.location.and_then(|l| l.display_name),
        salary: format_salary_range(raw.salary_min, raw.salary_max, None),
        posted_at: raw.created.map(PostedAt::Iso).unwrap_or_default(),
        description: raw.description,
        tags: raw.category.and_then(|c| c.label).into_iter().collect(),
        url: raw.redirect_url,
    }
}

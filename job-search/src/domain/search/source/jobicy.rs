use std::sync::Arc;

use async_trait::async_trait;
use job_boards::domain::RawJobicyJob;
use job_boards::{Board, BoardClient};

use super::{into_jobs, ClientFilter, SourceOptions};
use crate::domain::search::normalize::format_salary_range;
use crate::domain::search::traits::{JobSource, Result};
use crate::domain::search::types::{Job, PostedAt, PostingDraft};

/// Jobicy has no text search, so a fixed page is scanned client-side.
pub struct JobicySource {
    client: Arc<BoardClient>,
    options: SourceOptions,
}

impl JobicySource {
    pub fn new(client: Arc<BoardClient>, options: SourceOptions) -> Self {
        Self { client, options }
    }
}

#[async_trait]
impl JobSource for JobicySource {
    fn name(&self) -> &str {
        Board::Jobicy.name()
    }

    async fn fetch(&self, query: &str) -> Result<Vec<Job>> {
        let raw = self.client.fetch_jobicy(self.options.scan_page_size).await?;

        Ok(into_jobs(
            Board::Jobicy,
            raw.into_iter().map(to_draft),
            ClientFilter::Text,
            query,
            self.options.per_source_cap,
        ))
    }
}

fn to_draft(raw: RawJobicyJob) -> PostingDraft {
    let salary = format_salary_range(
        raw.annual_salary_min,
        raw.annual_salary_max,
        raw.salary_currency.as_deref(),
    );
    let tags = raw
        .job_industry
        .into_iter()
        .chain(raw.job_type)
        .chain(raw.job_level)
        .collect();

    PostingDraft {
        native_id: raw.id.to_string(),
        title: raw.job_title,
        company: raw.company_name,
        location: raw.job_geo,
        salary,
        posted_at: raw.pub_date.map(PostedAt::Iso).unwrap_or_default(),
        description: raw.job_description.or(raw.job_excerpt),
        tags,
        url: raw.url,
    }
}

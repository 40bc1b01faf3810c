use std::sync::Arc;

use async_trait::async_trait;
use job_boards::domain::RawHimalayasJob;
use job_boards::{Board, BoardClient};

use super::{into_jobs, ClientFilter, SourceOptions};
use crate::domain::search::normalize::format_salary_range;
use crate::domain::search::traits::{JobSource, Result};
use crate::domain::search::types::{Job, PostedAt, PostingDraft};

pub struct HimalayasSource {
    client: Arc<BoardClient>,
    options: SourceOptions,
}

impl HimalayasSource {
    pub fn new(client: Arc<BoardClient>, options: SourceOptions) -> Self {
        Self { client, options }
    }
}

#[async_trait]
impl JobSource for HimalayasSource {
    fn name(&self) -> &str {
        Board::Himalayas.name()
    }

    async fn fetch(&self, query: &str) -> Result<Vec<Job>> {
        let raw = self
            .client
            .fetch_himalayas(self.options.scan_page_size)
            .await?;

        Ok(into_jobs(
            Board::Himalayas,
            raw.into_iter().map(to_draft),
            ClientFilter::TextAndTags,
            query,
            self.options.per_source_cap,
        ))
    }
}

fn to_draft(raw: RawHimalayasJob) -> PostingDraft {
    let location = Some(raw.location_restrictions.join(", "));
    let salary = format_salary_range(raw.min_salary, raw.max_salary, raw.currency.as_deref());
    let tags = raw
        .categories
        .into_iter()
        .chain(raw.employment_type)
        .chain(raw.seniority)
        .collect();

    PostingDraft {
        native_id: raw.guid.to_string(),
        title: raw.title,
        company: raw.company_name,
        location,
        salary,
        posted_at: raw.pub_date.map(PostedAt::Unix).unwrap_or_default(),
        description: raw.description.or(raw.excerpt),
        tags,
        url: raw.application_link,
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use job_boards::domain::RawArbeitnowJob;
use job_boards::{Board, BoardClient};

use super::{into_jobs, ClientFilter, SourceOptions};
use crate::domain::search::traits::{JobSource, Result};
use crate::domain::search::types::{Job, PostedAt, PostingDraft};

/// Arbeitnow returns one fixed page; the query is matched client-side, tags included.
pub struct ArbeitnowSource {
    client: Arc<BoardClient>,
    options: SourceOptions,
}

impl ArbeitnowSource {
    pub fn new(client: Arc<BoardClient>, options: SourceOptions) -> Self {
        Self { client, options }
    }
}

#[async_trait]
impl JobSource for ArbeitnowSource {
    fn name(&self) -> &str {
        Board::Arbeitnow.name()
    }

    async fn fetch(&self, query: &str) -> Result<Vec<Job>> {
        let raw = self.client.fetch_arbeitnow().await?;

        Ok(into_jobs(
            Board::Arbeitnow,
            raw.into_iter().map(to_draft),
            ClientFilter::TextAndTags,
            query,
            self.options.per_source_cap,
        ))
    }
}

fn to_draft(raw: RawArbeitnowJob) -> PostingDraft {
    PostingDraft {
        native_id: raw.slug.to_string(),
        title: raw.title,
        company: raw.company_name,
        location: raw.location,
        salary: None,
        posted_at: raw.created_at.map(PostedAt::Unix).unwrap_or_default(),
        description: raw.description,
        tags: raw.tags.into_iter().chain(raw.job_types).collect(),
        url: raw.url,
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use job_boards::domain::RawRemotiveJob;
use job_boards::{Board, BoardClient};

use super::{into_jobs, ClientFilter, SourceOptions};
use crate::domain::search::traits::{JobSource, Result};
use crate::domain::search::types::{Job, PostedAt, PostingDraft};

/// Remotive searches server-side; an empty query lists the latest postings.
pub struct RemotiveSource {
    client: Arc<BoardClient>,
    options: SourceOptions,
}

impl RemotiveSource {
    pub fn new(client: Arc<BoardClient>, options: SourceOptions) -> Self {
        Self { client, options }
    }
}

#[async_trait]
impl JobSource for RemotiveSource {
    fn name(&self) -> &str {
        Board::Remotive.name()
    }

    async fn fetch(&self, query: &str) -> Result<Vec<Job>> {
        let query = query.trim();
        let raw = self
            .client
            .fetch_remotive(query, self.options.per_source_cap)
            .await?;

        Ok(into_jobs(
            Board::Remotive,
            raw.into_iter().map(to_draft),
            ClientFilter::None,
            query,
            self.options.per_source_cap,
        ))
    }
}

fn to_draft(raw: RawRemotiveJob) -> PostingDraft {
    let tags = raw
        .tags
        .into_iter()
        .chain(raw.category)
        .chain(raw.job_type)
        .collect();

    PostingDraft {
        native_id: raw.id.to_string(),
        title: raw.title,
        company: raw.company_name,
        location: raw.candidate_required_location,
        salary: raw.salary,
        posted_at: raw
            .publication_date
            .map(PostedAt::Iso)
            .unwrap_or_default(),
        description: raw.description,
        tags,
        url: raw.url,
    }
}

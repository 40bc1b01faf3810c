use std::sync::Arc;

use async_trait::async_trait;
use job_boards::domain::RawMuseJob;
use job_boards::{ApiKey, Board, BoardClient};

use super::{into_jobs, ClientFilter, Credential, SourceOptions};
use crate::domain::search::traits::{JobSource, Result};
use crate::domain::search::types::{Job, PostedAt, PostingDraft};

const FIRST_PAGE: u32 = 0;

/// The Muse needs an API key and has no text search; the newest page is
/// filtered client-side.
pub struct MuseSource {
    client: Arc<BoardClient>,
    api_key: Credential<ApiKey>,
    options: SourceOptions,
}

impl MuseSource {
    pub fn new(
        client: Arc<BoardClient>,
        api_key: Credential<ApiKey>,
        options: SourceOptions,
    ) -> Self {
        Self {
            client,
            api_key,
            options,
        }
    }
}

#[async_trait]
impl JobSource for MuseSource {
    fn name(&self) -> &str {
        Board::TheMuse.name()
    }

    async fn fetch(&self, query: &str) -> Result<Vec<Job>> {
        let api_key = self.api_key.require(Board::TheMuse)?;
        let raw = self.client.fetch_muse(api_key, FIRST_PAGE).await?;

        Ok(into_jobs(
            Board::TheMuse,
            raw.into_iter().map(to_draft),
            ClientFilter::Text,
            query,
            self.options.per_source_cap,
        ))
    }
}

fn to_draft(raw: RawMuseJob) -> PostingDraft {
    let native_id = raw.id.to_string();
    let url = raw
        .refs
        .and_then(|refs| refs.landing_page)
        .filter(|page| !page.trim().is_empty())
        .unwrap_or_else(|| format!("https://www.themuse.com/jobs/{}", native_id));

    PostingDraft {
        title: raw.name,
        company: raw.company.and_then(|c| c.name),
        location: raw.locations.into_iter().next().and_then(|l| l.name),
        salary: None,
        posted_at: raw
            .publication_date
            .map(PostedAt::Iso)
            .unwrap_or_default(),
        description: raw.contents,
        tags: raw.categories.into_iter().filter_map(|c| c.name).collect(),
        url: Some(url),
        native_id,
    }
}

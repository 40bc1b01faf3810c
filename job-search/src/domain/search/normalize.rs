//! Turns board-specific drafts into normalized [`Job`]s.
//!
//! Every adapter funnels its records through [`normalize_posting`], so sentinel
//! defaults, HTML stripping, truncation, date formatting and tag cleanup behave
//! the same for every board.

use std::sync::LazyLock;

use itertools::Itertools;
use job_boards::Board;
use regex::Regex;
use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use super::types::{Job, PostedAt, PostingDraft};

pub const UNTITLED: &str = "Untitled Position";
pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const DEFAULT_LOCATION: &str = "Remote";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const RECENTLY: &str = "Recently";
pub const DESCRIPTION_LIMIT: usize = 300;
pub const ELLIPSIS: &str = "...";

const POSTED_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [year]");
const ISO_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Timestamps above this are taken to be milliseconds.
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>?").unwrap());

/// Build a [`Job`] from a draft. Returns `None` when the draft has no native id.
pub fn normalize_posting(board: Board, draft: PostingDraft) -> Option<Job> {
    let native_id = draft.native_id.trim();
    if native_id.is_empty() {
        return None;
    }

    Some(Job {
        id: format!("{}-{}", board.tag(), native_id),
        title: or_sentinel(draft.title, UNTITLED),
        company: or_sentinel(draft.company, UNKNOWN_COMPANY),
        location: or_sentinel(draft.location, DEFAULT_LOCATION),
        salary: non_blank(draft.salary),
        posted_date: format_posted_date(parse_timestamp(&draft.posted_at)),
        description: summarize_description(draft.description.as_deref()),
        source_board: board.to_string(),
        tags: clean_tags(draft.tags),
        url: draft.url.map(|u| u.trim().to_string()).unwrap_or_default(),
    })
}

pub fn or_sentinel(value: Option<String>, sentinel: &str) -> String {
    non_blank(value).unwrap_or_else(|| sentinel.to_string())
}

/// Trims the value and drops it if nothing is left.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Removes anything that looks like a tag and decodes the common entities.
pub fn strip_html(raw: &str) -> String {
    let without_tags = HTML_TAG.replace_all(raw, "");
    without_tags
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

/// Plain-text description cut to [`DESCRIPTION_LIMIT`] characters, followed by [`ELLIPSIS`].
pub fn summarize_description(raw: Option<&str>) -> String {
    let text = raw.map(strip_html).unwrap_or_default();
    if text.is_empty() {
        return NO_DESCRIPTION.to_string();
    }

    let mut summary: String = text.chars().take(DESCRIPTION_LIMIT).collect();
    summary.push_str(ELLIPSIS);
    summary
}

/// Trimmed, non-empty, first occurrence wins.
pub fn clean_tags(tags: impl IntoIterator<Item = String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| strip_html(&tag))
        .filter(|tag| !tag.is_empty())
        .unique()
        .collect()
}

pub fn parse_timestamp(posted_at: &PostedAt) -> Option<Date> {
    match posted_at {
        PostedAt::Iso(raw) => parse_iso_date(raw),
        PostedAt::Unix(secs) => {
            let secs = if secs.unsigned_abs() > MILLIS_THRESHOLD.unsigned_abs() {
                secs / 1000
            } else {
                *secs
            };
            OffsetDateTime::from_unix_timestamp(secs)
                .ok()
                .map(|dt| dt.date())
        }
        PostedAt::Unknown => None,
    }
}

/// Full RFC 3339 timestamps are converted to UTC; anything else only needs a
/// leading `YYYY-MM-DD`.
fn parse_iso_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if let Ok(dt) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(dt.to_offset(time::UtcOffset::UTC).date());
    }
    raw.get(..10)
        .and_then(|prefix| Date::parse(prefix, ISO_DATE_FORMAT).ok())
}

pub fn format_posted_date(date: Option<Date>) -> String {
    date.and_then(|d| d.format(POSTED_DATE_FORMAT).ok())
        .unwrap_or_else(|| RECENTLY.to_string())
}

/// Inverse of [`format_posted_date`]. `Recently` and anything unrecognized yield `None`.
pub fn parse_posted_date(posted_date: &str) -> Option<Date> {
    Date::parse(posted_date.trim(), POSTED_DATE_FORMAT).ok()
}

/// `$31k - $37k` style range. Both ends must be present and positive.
pub fn format_salary_range(
    min: Option<f64>,
    max: Option<f64>,
    currency: Option<&str>,
) -> Option<String> {
    let (min, max) = match (min, max) {
        (Some(min), Some(max)) if min > 0.0 && max > 0.0 => (min, max),
        _ => return None,
    };

    let prefix = match currency.map(|c| c.trim().to_ascii_uppercase()).as_deref() {
        None | Some("") | Some("USD") => "$".to_string(),
        Some("EUR") => "€".to_string(),
        Some("GBP") => "£".to_string(),
        Some(code) => format!("{} ", code),
    };

    Some(format!(
        "{prefix}{}k - {prefix}{}k",
        (min / 1000.0).round() as i64,
        (max / 1000.0).round() as i64
    ))
}

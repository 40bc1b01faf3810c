//! Multi-factor relevance ranking.
//!
//! With a query, every job gets a composite score in `[0, 100]`:
//!
//! | Factor         | Weight |
//! |----------------|--------|
//! | Keyword match  | 40%    |
//! | Board specialty| 20%    |
//! | Freshness      | 20%    |
//! | Source quality | 10%    |
//! | Engagement     | 10%    |
//!
//! Without a query jobs are ordered newest first. Both orders are stable, so
//! ties keep the order the jobs arrived in.

use std::collections::BTreeMap;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use tracing::debug;

use super::traits::{Result, SearchError};
use super::types::Job;

pub const KEYWORD_WEIGHT: f64 = 0.40;
pub const SPECIALTY_WEIGHT: f64 = 0.20;
pub const FRESHNESS_WEIGHT: f64 = 0.20;
pub const SOURCE_QUALITY_WEIGHT: f64 = 0.10;
pub const ENGAGEMENT_WEIGHT: f64 = 0.10;

/// No behavioral signal exists yet, so every job gets the same neutral value.
pub const ENGAGEMENT_SCORE: f64 = 50.0;

const TITLE_MATCH: f64 = 60.0;
const COMPANY_MATCH: f64 = 10.0;
const DESCRIPTION_MATCH: f64 = 20.0;
const TAG_MATCH: f64 = 5.0;
const TAG_MATCH_CAP: f64 = 10.0;

const SPECIALTY_MATCH: f64 = 100.0;
const AGGREGATOR_BOARD: f64 = 80.0;
const GENERAL_BOARD: f64 = 40.0;
const DEFAULT_SPECIALTY: f64 = 70.0;

const FRESHNESS_DECAY: f64 = 0.05;
const FRESHNESS_FLOOR: f64 = 5.0;
const FRESHNESS_CEILING: f64 = 100.0;
const UNKNOWN_FRESHNESS: f64 = 50.0;

/// A query category and the boards that specialize in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialtyCategory {
    pub name: String,
    /// Matched case-insensitively against the query.
    pub pattern: String,
    pub boards: Vec<String>,
}

impl SpecialtyCategory {
    fn new(name: &str, pattern: &str, boards: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
            boards: boards.iter().map(|b| b.to_string()).collect(),
        }
    }
}

/// Lookup tables behind the board specialty and source quality factors.
///
/// Boards are referenced by display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub specialties: Vec<SpecialtyCategory>,
    pub general_boards: Vec<String>,
    pub aggregator_boards: Vec<String>,
    pub source_tiers: BTreeMap<String, f64>,
    pub default_source_quality: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        let source_tiers = [
            ("Remotive", 95.0),
            ("The Muse", 95.0),
            ("Jobicy", 85.0),
            ("Arbeitnow", 85.0),
            ("Remote OK", 85.0),
            ("Himalayas", 85.0),
            ("Adzuna", 75.0),
            ("Jooble", 75.0),
        ]
        .into_iter()
        .map(|(board, score)| (board.to_string(), score))
        .collect();

        Self {
            specialties: vec![
                SpecialtyCategory::new(
                    "ai",
                    "ai|machine learning|ml|data science|artificial intelligence",
                    &["Remotive"],
                ),
                SpecialtyCategory::new(
                    "product-management",
                    "product manager|pm|product|scrum|agile",
                    &["The Muse"],
                ),
                SpecialtyCategory::new("marketing", "marketing|seo|growth|content", &["Jobicy"]),
            ],
            general_boards: vec!["Adzuna".to_string(), "Arbeitnow".to_string()],
            aggregator_boards: vec!["Jooble".to_string()],
            source_tiers,
            default_source_quality: 60.0,
        }
    }
}

/// Per-factor scores for one job, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub keyword: f64,
    pub specialty: f64,
    pub freshness: f64,
    pub source_quality: f64,
    pub engagement: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        let total = KEYWORD_WEIGHT * self.keyword
            + SPECIALTY_WEIGHT * self.specialty
            + FRESHNESS_WEIGHT * self.freshness
            + SOURCE_QUALITY_WEIGHT * self.source_quality
            + ENGAGEMENT_WEIGHT * self.engagement;
        total.clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone)]
struct CompiledSpecialty {
    name: String,
    pattern: Regex,
    boards: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Ranker {
    specialties: Vec<CompiledSpecialty>,
    general_boards: Vec<String>,
    aggregator_boards: Vec<String>,
    source_tiers: BTreeMap<String, f64>,
    default_source_quality: f64,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(RankingConfig::default()).expect("default specialty patterns are valid")
    }
}

impl Ranker {
    /// Compiles the specialty patterns. An invalid pattern is a configuration error.
    pub fn new(config: RankingConfig) -> Result<Self> {
        let specialties = config
            .specialties
            .into_iter()
            .map(|category| {
                let pattern = RegexBuilder::new(&category.pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| {
                        SearchError::ConfigError(format!(
                            "invalid pattern for specialty '{}': {}",
                            category.name, e
                        ))
                    })?;
                Ok(CompiledSpecialty {
                    name: category.name,
                    pattern,
                    boards: category.boards,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let source_tiers = config
            .source_tiers
            .into_iter()
            .map(|(board, score)| (board.to_lowercase(), score.clamp(0.0, 100.0)))
            .collect();

        Ok(Self {
            specialties,
            general_boards: config.general_boards,
            aggregator_boards: config.aggregator_boards,
            source_tiers,
            default_source_quality: config.default_source_quality.clamp(0.0, 100.0),
        })
    }

    /// Order jobs for the query, as of today (UTC).
    pub fn rank(&self, jobs: Vec<Job>, query: &str) -> Vec<Job> {
        self.rank_on(jobs, query, OffsetDateTime::now_utc().date())
    }

    pub fn rank_on(&self, jobs: Vec<Job>, query: &str, today: Date) -> Vec<Job> {
        let query = query.trim().to_lowercase();

        if query.is_empty() {
            return sort_by_posted_date(jobs);
        }

        debug!(
            query = %query,
            categories = ?self.detect_categories(&query),
            count = jobs.len(),
            "Ranking jobs"
        );

        let mut scored: Vec<(f64, Job)> = jobs
            .into_iter()
            .map(|job| (self.score_on(&job, &query, today).total(), job))
            .collect();

        // `sort_by` is stable, equal scores keep their incoming order
        scored.sort_by(|(a, _), (b, _)| b.total_cmp(a));
        scored.into_iter().map(|(_, job)| job).collect()
    }

    pub fn score(&self, job: &Job, query: &str) -> ScoreBreakdown {
        self.score_on(
            job,
            &query.trim().to_lowercase(),
            OffsetDateTime::now_utc().date(),
        )
    }

    /// `query` must already be trimmed and lowercased.
    pub fn score_on(&self, job: &Job, query: &str, today: Date) -> ScoreBreakdown {
        ScoreBreakdown {
            keyword: keyword_score(job, query),
            specialty: self.specialty_score(&job.source_board, query),
            freshness: freshness_score(job.posted_on(), today),
            source_quality: self.source_quality_score(&job.source_board),
            engagement: ENGAGEMENT_SCORE,
        }
    }

    /// Names of the specialty categories the query falls into.
    pub fn detect_categories(&self, query: &str) -> Vec<&str> {
        self.specialties
            .iter()
            .filter(|s| s.pattern.is_match(query))
            .map(|s| s.name.as_str())
            .collect()
    }

    fn specialty_score(&self, board: &str, query: &str) -> f64 {
        let specialized = self
            .specialties
            .iter()
            .any(|s| s.pattern.is_match(query) && contains_board(&s.boards, board));

        if specialized {
            SPECIALTY_MATCH
        } else if contains_board(&self.aggregator_boards, board) {
            AGGREGATOR_BOARD
        } else if contains_board(&self.general_boards, board) {
            GENERAL_BOARD
        } else {
            DEFAULT_SPECIALTY
        }
    }

    fn source_quality_score(&self, board: &str) -> f64 {
        self.source_tiers
            .get(&board.to_lowercase())
            .copied()
            .unwrap_or(self.default_source_quality)
    }
}

fn contains_board(boards: &[String], board: &str) -> bool {
    boards.iter().any(|b| b.eq_ignore_ascii_case(board))
}

fn sort_by_posted_date(jobs: Vec<Job>) -> Vec<Job> {
    let mut dated: Vec<(Option<Date>, Job)> =
        jobs.into_iter().map(|job| (job.posted_on(), job)).collect();

    // `None` orders before any date, so unparsable dates end up last
    dated.sort_by(|(a, _), (b, _)| b.cmp(a));
    dated.into_iter().map(|(_, job)| job).collect()
}

/// `query` must already be lowercased.
pub fn keyword_score(job: &Job, query: &str) -> f64 {
    let mut score = 0.0;

    if job.title.to_lowercase().contains(query) {
        score += TITLE_MATCH;
    }
    if job.company.to_lowercase().contains(query) {
        score += COMPANY_MATCH;
    }
    if job.description.to_lowercase().contains(query) {
        score += DESCRIPTION_MATCH;
    }

    let matching_tags = job
        .tags
        .iter()
        .map(|tag| tag.to_lowercase())
        .filter(|tag| tag.contains(query) || query.contains(tag.as_str()))
        .count();
    score += (matching_tags as f64 * TAG_MATCH).min(TAG_MATCH_CAP);

    score.min(100.0)
}

/// `100 * e^(-0.05 * days)`, clamped to `[5, 100]`. Unknown dates score 50.
pub fn freshness_score(posted: Option<Date>, today: Date) -> f64 {
    let Some(posted) = posted else {
        return UNKNOWN_FRESHNESS;
    };

    let days_old = (today - posted).whole_days().max(0) as f64;
    (100.0 * (-FRESHNESS_DECAY * days_old).exp()).clamp(FRESHNESS_FLOOR, FRESHNESS_CEILING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::normalize::format_posted_date;
    use time::Duration;

    fn today() -> Date {
        OffsetDateTime::now_utc().date()
    }

    fn job(id: &str, title: &str, board: &str, posted: Option<Date>) -> Job {
        Job {
            id: id.into(),
            title: title.into(),
            company: "Acme".into(),
            location: "Remote".into(),
            salary: None,
            posted_date: format_posted_date(posted),
            description: "No description available.".into(),
            source_board: board.into(),
            tags: vec![],
            url: String::new(),
        }
    }

    fn ids(jobs: &[Job]) -> Vec<&str> {
        jobs.iter().map(|j| j.id.as_str()).collect()
    }

    #[test]
    fn product_manager_outranks_warehouse_job() {
        let ranker = Ranker::default();
        let jobs = vec![
            job("adzuna-1", "Warehouse Associate", "Adzuna", Some(today())),
            job("muse-1", "Senior Product Manager", "The Muse", Some(today())),
        ];

        let pm = ranker.score(&jobs[1], "product manager");
        let warehouse = ranker.score(&jobs[0], "product manager");
        assert_eq!(pm.keyword, 60.0);
        assert_eq!(pm.specialty, 100.0);
        assert_eq!(warehouse.specialty, 40.0);
        assert!(pm.total() > warehouse.total());

        let ranked = ranker.rank(jobs, "product manager");
        assert_eq!(ids(&ranked), vec!["muse-1", "adzuna-1"]);
    }

    #[test]
    fn keyword_score_components() {
        let mut j = job("x", "Rust Engineer", "Remotive", None);
        j.company = "Rustacean Labs".into();
        j.description = "We write rust all day...".into();
        j.tags = vec!["rust".into(), "Rust Async".into(), "rustc".into(), "go".into()];

        // 60 + 10 + 20 + min(3 * 5, 10), capped at 100
        assert_eq!(keyword_score(&j, "rust"), 100.0);

        j.description = "No description available.".into();
        assert_eq!(keyword_score(&j, "rust"), 80.0);

        // "go" is contained in the query, so the tag counts
        assert_eq!(keyword_score(&j, "golang"), 5.0);
        assert_eq!(keyword_score(&j, "python"), 0.0);
    }

    #[test]
    fn specialty_tiers() {
        let ranker = Ranker::default();
        assert_eq!(ranker.specialty_score("Remotive", "machine learning"), 100.0);
        assert_eq!(ranker.specialty_score("Jobicy", "seo specialist"), 100.0);
        assert_eq!(ranker.specialty_score("Jooble", "rust"), 80.0);
        assert_eq!(ranker.specialty_score("Arbeitnow", "rust"), 40.0);
        assert_eq!(ranker.specialty_score("Remotive", "rust"), 70.0);
        assert_eq!(ranker.specialty_score("Unknown Board", "machine learning"), 70.0);
    }

    #[test]
    fn detects_categories_case_insensitively() {
        let ranker = Ranker::default();
        assert_eq!(ranker.detect_categories("Data Science lead"), vec!["ai"]);
        assert_eq!(
            ranker.detect_categories("agile content coach"),
            vec!["product-management", "marketing"]
        );
        assert!(ranker.detect_categories("welder").is_empty());
    }

    #[test]
    fn source_quality_uses_tiers() {
        let ranker = Ranker::default();
        assert_eq!(ranker.source_quality_score("The Muse"), 95.0);
        assert_eq!(ranker.source_quality_score("jobicy"), 85.0);
        assert_eq!(ranker.source_quality_score("Adzuna"), 75.0);
        assert_eq!(ranker.source_quality_score("Mock Jobs"), 60.0);
    }

    #[test]
    fn freshness_decays_and_clamps() {
        let today = today();
        assert_eq!(freshness_score(Some(today), today), 100.0);
        assert_eq!(freshness_score(Some(today + Duration::days(3)), today), 100.0);

        let ten_days = freshness_score(Some(today - Duration::days(10)), today);
        assert!((ten_days - 100.0 * (-0.5f64).exp()).abs() < 1e-9);

        assert_eq!(freshness_score(Some(today - Duration::days(400)), today), 5.0);
        assert_eq!(freshness_score(None, today), 50.0);
    }

    #[test]
    fn scores_stay_in_bounds() {
        let ranker = Ranker::new(RankingConfig {
            source_tiers: [("Remotive".to_string(), 250.0)].into_iter().collect(),
            default_source_quality: -20.0,
            ..Default::default()
        })
        .unwrap();

        let mut loaded = job("a", "ai ai ai", "Remotive", Some(today()));
        loaded.company = "ai".into();
        loaded.description = "ai".into();
        loaded.tags = vec!["ai".into(); 10];
        let stale = job("b", "x", "Nowhere", Some(today() - Duration::days(10_000)));
        let undated = job("c", "", "", None);

        for j in [&loaded, &stale, &undated] {
            for query in ["ai", "x", "zzz", "a"] {
                let total = ranker.score(j, query).total();
                assert!((0.0..=100.0).contains(&total), "{total} for {query}");
            }
        }
    }

    #[test]
    fn invalid_pattern_is_config_error() {
        let config = RankingConfig {
            specialties: vec![SpecialtyCategory::new("broken", "(unclosed", &["Remotive"])],
            ..Default::default()
        };
        assert!(matches!(Ranker::new(config), Err(SearchError::ConfigError(_))));
    }

    #[test]
    fn empty_query_sorts_newest_first_with_undated_last() {
        let today = today();
        let jobs = vec![
            job("undated", "A", "Remotive", None),
            job("old", "B", "Remotive", Some(today - Duration::days(30))),
            job("new-1", "C", "Remotive", Some(today)),
            job("mid", "D", "Remotive", Some(today - Duration::days(2))),
            job("new-2", "E", "Jobicy", Some(today)),
        ];

        let ranked = Ranker::default().rank(jobs, "   ");
        assert_eq!(ids(&ranked), vec!["new-1", "new-2", "mid", "old", "undated"]);
    }

    #[test]
    fn equal_scores_keep_input_order() {
        let jobs: Vec<Job> = (0..6)
            .map(|i| job(&format!("j{i}"), "Rust Engineer", "Remotive", Some(today())))
            .collect();

        let ranked = Ranker::default().rank(jobs, "rust");
        assert_eq!(ids(&ranked), vec!["j0", "j1", "j2", "j3", "j4", "j5"]);
    }
}

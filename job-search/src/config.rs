use std::str::FromStr;
use std::time::Duration;

use config::ConfigError;
use itertools::Itertools;
use job_boards::{AdzunaCredentials, ApiKey, Board, BoardEndpoints};
use serde::Deserialize;
use serde_with::serde_as;
use strum::{Display, EnumString};

use crate::domain::search::{
    Credential, FetchPolicy, RankingConfig, SourceCredentials, SourceOptions,
};

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Settings {
    pub search: SearchSettings,
    pub boards: BoardSettings,
    pub credentials: CredentialSettings,
    pub ranking: RankingConfig,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SearchSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub timeout_secs: u64,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub retries: u32,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub per_source_cap: usize,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub scan_page_size: usize,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub cache_ttl_secs: u64,
    /// Fan-out order.
    pub enabled_boards: Vec<Board>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            retries: 0,
            per_source_cap: 20,
            scan_page_size: 50,
            cache_ttl_secs: 3600,
            enabled_boards: Board::all(),
        }
    }
}

impl SearchSettings {
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy {
            timeout: Duration::from_secs(self.timeout_secs),
            retries: self.retries,
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Enabled boards with repeats removed, first listing wins.
    pub fn boards(&self) -> Vec<Board> {
        self.enabled_boards.iter().copied().unique().collect()
    }
}

/// Base URL overrides, mostly for pointing boards at a local mock.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct BoardSettings {
    pub remotive: Option<String>,
    pub jobicy: Option<String>,
    pub arbeitnow: Option<String>,
    pub muse: Option<String>,
    pub adzuna: Option<String>,
    pub remoteok: Option<String>,
    pub himalayas: Option<String>,
    pub jooble: Option<String>,
    pub adzuna_country: String,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            remotive: None,
            jobicy: None,
            arbeitnow: None,
            muse: None,
            adzuna: None,
            remoteok: None,
            himalayas: None,
            jooble: None,
            adzuna_country: "us".to_string(),
        }
    }
}

impl BoardSettings {
    fn base_url(&self, board: Board) -> Option<&str> {
        let base_url = match board {
            Board::Remotive => &self.remotive,
            Board::Jobicy => &self.jobicy,
            Board::Arbeitnow => &self.arbeitnow,
            Board::TheMuse => &self.muse,
            Board::Adzuna => &self.adzuna,
            Board::RemoteOk => &self.remoteok,
            Board::Himalayas => &self.himalayas,
            Board::Jooble => &self.jooble,
        };
        base_url.as_deref().map(str::trim).filter(|url| !url.is_empty())
    }

    pub fn endpoints(&self) -> BoardEndpoints {
        Board::all()
            .into_iter()
            .fold(BoardEndpoints::default(), |endpoints, board| {
                match self.base_url(board) {
                    Some(url) => endpoints.with_base_url(board, url),
                    None => endpoints,
                }
            })
    }
}

/// Names of the environment variables holding board credentials.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct CredentialSettings {
    pub muse_api_key_var: String,
    pub adzuna_app_id_var: String,
    pub adzuna_app_key_var: String,
    pub jooble_api_key_var: String,
}

impl Default for CredentialSettings {
    fn default() -> Self {
        Self {
            muse_api_key_var: "THE_MUSE_API_KEY".to_string(),
            adzuna_app_id_var: "ADZUNA_APP_ID".to_string(),
            adzuna_app_key_var: "ADZUNA_APP_KEY".to_string(),
            jooble_api_key_var: "JOOBLE_API_KEY".to_string(),
        }
    }
}

impl CredentialSettings {
    /// Look every credential up in the process environment.
    pub fn resolve(&self) -> SourceCredentials {
        SourceCredentials {
            muse: api_key(&self.muse_api_key_var),
            adzuna: self.adzuna(),
            jooble: api_key(&self.jooble_api_key_var),
        }
    }

    fn adzuna(&self) -> Credential<AdzunaCredentials> {
        let app_id = ApiKey::from_env(&self.adzuna_app_id_var);
        let app_key = ApiKey::from_env(&self.adzuna_app_key_var);
        match (app_id, app_key) {
            (Some(id), Some(key)) => Credential::present(
                AdzunaCredentials::new(id.expose(), key.expose()),
                self.adzuna_app_id_var.as_str(),
            ),
            (None, _) => Credential::missing(self.adzuna_app_id_var.as_str()),
            (Some(_), None) => Credential::missing(self.adzuna_app_key_var.as_str()),
        }
    }
}

fn api_key(variable: &str) -> Credential<ApiKey> {
    match ApiKey::from_env(variable) {
        Some(key) => Credential::present(key, variable),
        None => Credential::missing(variable),
    }
}

impl Settings {
    pub fn source_options(&self) -> SourceOptions {
        SourceOptions {
            per_source_cap: self.search.per_source_cap,
            scan_page_size: self.search.scan_page_size,
            adzuna_country: self.boards.adzuna_country.trim().to_lowercase(),
        }
    }
}

/// Layered configuration: `config/base.yaml`, then `config/{APP_ENVIRONMENT}.yaml`,
/// then `JOB_SEARCH_*` environment variables (`JOB_SEARCH_SEARCH__TIMEOUT_SECS=5`).
///
/// Both files are optional; every setting has a default.
pub fn read_config() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| ConfigError::Foreign(Box::new(e)))?;
    let config_directory = base_path.join("config");

    let raw_environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".into());
    let environment = Environment::from_str(&raw_environment).map_err(|_| {
        ConfigError::Message(format!(
            "Failed to parse APP_ENVIRONMENT '{}', expected local or production",
            raw_environment
        ))
    })?;
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")).required(false))
        .add_source(
            config::File::from(config_directory.join(environment_filename)).required(false),
        )
        .add_source(
            config::Environment::with_prefix("JOB_SEARCH")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString, PartialEq, Eq)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_yaml(yaml: &str) -> Settings {
        config::Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_config_uses_defaults() {
        let settings = from_yaml("");

        assert_eq!(settings.search.timeout_secs, 10);
        assert_eq!(settings.search.retries, 0);
        assert_eq!(settings.search.per_source_cap, 20);
        assert_eq!(settings.search.scan_page_size, 50);
        assert_eq!(settings.search.cache_ttl_secs, 3600);
        assert_eq!(settings.search.boards(), Board::all());
        assert_eq!(settings.boards.adzuna_country, "us");
        assert_eq!(settings.credentials.jooble_api_key_var, "JOOBLE_API_KEY");
        assert_eq!(settings.ranking, RankingConfig::default());
    }

    #[test]
    fn numbers_may_be_strings_and_boards_use_tags() {
        let settings = from_yaml(
            r#"
search:
  timeout_secs: "3"
  enabled_boards: [jooble, remotive, jooble]
boards:
  adzuna_country: " GB "
  remotive: "http://localhost:9000"
"#,
        );

        assert_eq!(settings.search.fetch_policy().timeout, Duration::from_secs(3));
        assert_eq!(settings.search.boards(), vec![Board::Jooble, Board::Remotive]);
        assert_eq!(settings.source_options().adzuna_country, "gb");
        assert_eq!(
            settings.boards.endpoints().base_url(Board::Remotive).as_ref(),
            "http://localhost:9000"
        );
        assert_eq!(
            settings.boards.endpoints().base_url(Board::Jobicy).as_ref(),
            "https://jobicy.com"
        );
    }

    #[test]
    fn unset_credentials_resolve_to_missing() {
        let credentials = CredentialSettings {
            muse_api_key_var: "JOB_SEARCH_TEST_UNSET_MUSE_KEY".to_string(),
            adzuna_app_id_var: "JOB_SEARCH_TEST_UNSET_ADZUNA_ID".to_string(),
            adzuna_app_key_var: "JOB_SEARCH_TEST_UNSET_ADZUNA_KEY".to_string(),
            jooble_api_key_var: "JOB_SEARCH_TEST_UNSET_JOOBLE_KEY".to_string(),
        }
        .resolve();

        assert!(!credentials.muse.is_present());
        assert_eq!(credentials.adzuna.variable(), "JOB_SEARCH_TEST_UNSET_ADZUNA_ID");
        assert!(!credentials.jooble.is_present());
    }

    #[test]
    fn environment_parses_case_insensitively() {
        assert_eq!(Environment::from_str("Production").unwrap(), Environment::Production);
        assert_eq!(Environment::Local.to_string(), "local");
        assert!(Environment::from_str("staging").is_err());
    }
}

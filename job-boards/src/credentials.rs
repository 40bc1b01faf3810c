use std::env;
use std::fmt;

/// A single secret used to authenticate against a board.
///
/// `Debug` never prints the secret itself.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Reads the key from the named environment variable.
    ///
    /// Unset and blank variables both count as missing.
    pub fn from_env(variable: &str) -> Option<Self> {
        env::var(variable)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(Self)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Adzuna authenticates with an application id and key pair, both sent as query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdzunaCredentials {
    pub app_id: String,
    pub app_key: ApiKey,
}

impl AdzunaCredentials {
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: ApiKey::new(app_key),
        }
    }

    /// Returns `None` unless both variables are set.
    pub fn from_env(app_id_variable: &str, app_key_variable: &str) -> Option<Self> {
        let app_id = ApiKey::from_env(app_id_variable)?;
        let app_key = ApiKey::from_env(app_key_variable)?;
        Some(Self {
            app_id: app_id.0,
            app_key,
        })
    }
}

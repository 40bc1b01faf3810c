#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardURL(String);

impl AsRef<str> for BoardURL {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BoardURL {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl BoardURL {
    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    /// Append a query parameter. The value is percent-encoded, the key is used as is.
    pub fn with_param(&self, key: &str, value: impl AsRef<str>) -> Self {
        let separator = if self.0.contains('?') { '&' } else { '?' };
        Self(format!(
            "{}{}{}={}",
            self.0,
            separator,
            key,
            urlencoding::encode(value.as_ref())
        ))
    }
}

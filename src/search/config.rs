//! Configuration for catalog search.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::token_filter::stop::StopWordsSource;
use crate::error::{CurioError, Result};
use crate::search::highlight::HighlightConfig;

/// Default Dirichlet smoothing constant.
pub const DEFAULT_MU: f64 = 2000.0;

/// Configuration for [`CatalogSearcher`](crate::search::searcher::CatalogSearcher).
///
/// Every field has a default, so a JSON file only needs the keys it changes:
///
/// ```
/// use curio::search::config::SearchConfig;
///
/// let config: SearchConfig = serde_json::from_str(r#"{ "mu": 500.0 }"#).unwrap();
/// assert_eq!(config.mu, 500.0);
/// assert_eq!(config.default_limit, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Dirichlet smoothing constant μ.
    pub mu: f64,

    /// Number of results when the caller does not ask for a count.
    pub default_limit: usize,

    /// Upper bound on the number of results of one call.
    pub max_limit: usize,

    /// Score documents on a thread pool.
    pub parallel: bool,

    /// Thread pool size for parallel scoring.
    /// If None, uses the number of CPU cores.
    pub num_threads: Option<usize>,

    /// Where the stop word list comes from.
    pub stopwords: StopWordsSource,

    /// Highlight markup.
    pub highlight: HighlightConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            mu: DEFAULT_MU,
            default_limit: 10,
            max_limit: 50,
            parallel: false,
            num_threads: None,
            stopwords: StopWordsSource::default(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CurioError::resource_unavailable(format!("config {}: {e}", path.display()))
        })?;
        let config: SearchConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values make sense together.
    pub fn validate(&self) -> Result<()> {
        if !self.mu.is_finite() || self.mu < 0.0 {
            return Err(CurioError::config(format!(
                "mu must be a finite, non-negative number, got {}",
                self.mu
            )));
        }
        if self.max_limit == 0 {
            return Err(CurioError::config("max_limit must be at least 1"));
        }
        if self.num_threads == Some(0) {
            return Err(CurioError::config("num_threads must be at least 1"));
        }
        if self.highlight.tag.is_empty() {
            return Err(CurioError::config("highlight tag must not be empty"));
        }
        Ok(())
    }

    /// Set the smoothing constant.
    pub fn mu(mut self, mu: f64) -> Self {
        self.mu = mu;
        self
    }

    /// Set the default result count.
    pub fn default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// Set the result count cap.
    pub fn max_limit(mut self, limit: usize) -> Self {
        self.max_limit = limit;
        self
    }

    /// Enable or disable parallel scoring.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the thread pool size.
    pub fn num_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Set the stop word source.
    pub fn stopwords(mut self, source: StopWordsSource) -> Self {
        self.stopwords = source;
        self
    }

    /// Set the highlight markup.
    pub fn highlight(mut self, highlight: HighlightConfig) -> Self {
        self.highlight = highlight;
        self
    }

    /// The number of results a call asking for `k` actually gets.
    pub fn effective_limit(&self, k: Option<usize>) -> usize {
        k.unwrap_or(self.default_limit).min(self.max_limit)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.mu, 2000.0);
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.max_limit, 50);
        assert!(!config.parallel);
        assert_eq!(config.stopwords, StopWordsSource::Builtin);
        assert_eq!(config.highlight.tag, "mark");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_effective_limit() {
        let config = SearchConfig::default();
        assert_eq!(config.effective_limit(None), 10);
        assert_eq!(config.effective_limit(Some(0)), 0);
        assert_eq!(config.effective_limit(Some(7)), 7);
        assert_eq!(config.effective_limit(Some(500)), 50);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        for config in [
            SearchConfig::new().mu(-1.0),
            SearchConfig::new().mu(f64::NAN),
            SearchConfig::new().mu(f64::INFINITY),
            SearchConfig::new().max_limit(0),
            SearchConfig::new().num_threads(0),
            SearchConfig::new().highlight(HighlightConfig::new().tag("")),
        ] {
            assert!(matches!(config.validate(), Err(CurioError::Config(_))));
        }
        assert!(SearchConfig::new().mu(0.0).validate().is_ok());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curio.json");
        fs::write(
            &path,
            r#"{ "mu": 1000.0, "parallel": true, "stopwords": { "file": "stop.txt" } }"#,
        )
        .unwrap();

        let config = SearchConfig::from_file(&path).unwrap();
        assert_eq!(config.mu, 1000.0);
        assert!(config.parallel);
        assert_eq!(
            config.stopwords,
            StopWordsSource::File(PathBuf::from("stop.txt"))
        );
        assert_eq!(config.max_limit, 50);
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            SearchConfig::from_file(dir.path().join("missing.json")),
            Err(CurioError::ResourceUnavailable(_))
        ));

        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{ "max_limit": 0 }"#).unwrap();
        assert!(matches!(
            SearchConfig::from_file(&path),
            Err(CurioError::Config(_))
        ));

        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            SearchConfig::from_file(&path),
            Err(CurioError::Json(_))
        ));
    }
}

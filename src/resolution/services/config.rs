//! Configuration for the resolution service.

use serde::{Deserialize, Serialize};

/// Default number of ignore-marker checks run at once.
const DEFAULT_IGNORE_CHECK_CONCURRENCY: usize = 8;

/// Default number of default-branch lookups one search directive runs at once.
const DEFAULT_QUERY_RESOLUTION_CONCURRENCY: usize = 4;

/// Path of the file that opts a repository out of batch changes.
pub const DEFAULT_IGNORE_MARKER_PATH: &str = ".batchignore";

/// Tuning for [`super::RepositoryResolutionService`].
///
/// Concurrency limits of zero are treated as one.
///
/// # Examples
///
/// ```
/// use batch_targets::resolution::services::ResolverConfig;
///
/// let config: ResolverConfig =
///     serde_json::from_str(r#"{"ignoreCheckConcurrency": 32}"#).expect("valid json");
/// assert_eq!(config.ignore_check_limit(), 32);
/// assert_eq!(config.ignore_marker_path, ".batchignore");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Maximum number of ignore-marker stats in flight.
    pub ignore_check_concurrency: usize,
    /// Maximum number of default-branch lookups in flight per search directive.
    pub query_resolution_concurrency: usize,
    /// Path checked for the ignore marker.
    pub ignore_marker_path: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            ignore_check_concurrency: DEFAULT_IGNORE_CHECK_CONCURRENCY,
            query_resolution_concurrency: DEFAULT_QUERY_RESOLUTION_CONCURRENCY,
            ignore_marker_path: DEFAULT_IGNORE_MARKER_PATH.to_owned(),
        }
    }
}

impl ResolverConfig {
    /// Creates a configuration that talks to the git servers one call at a
    /// time.
    ///
    /// Useful for deterministic local runs.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            ignore_check_concurrency: 1,
            query_resolution_concurrency: 1,
            ..Self::default()
        }
    }

    /// Sets the ignore-marker check concurrency.
    #[must_use]
    pub const fn with_ignore_check_concurrency(mut self, limit: usize) -> Self {
        self.ignore_check_concurrency = limit;
        self
    }

    /// Sets the per-query default-branch lookup concurrency.
    #[must_use]
    pub const fn with_query_resolution_concurrency(mut self, limit: usize) -> Self {
        self.query_resolution_concurrency = limit;
        self
    }

    /// Sets the ignore marker path.
    #[must_use]
    pub fn with_ignore_marker_path(mut self, path: impl Into<String>) -> Self {
        self.ignore_marker_path = path.into();
        self
    }

    /// Returns the effective ignore-marker check concurrency.
    #[must_use]
    pub fn ignore_check_limit(&self) -> usize {
        self.ignore_check_concurrency.max(1)
    }

    /// Returns the effective per-query lookup concurrency.
    #[must_use]
    pub fn query_resolution_limit(&self) -> usize {
        self.query_resolution_concurrency.max(1)
    }
}

//! Classification of repositories excluded from a resolution.
//!
//! Classifications are plain data. Whether they surface as an error is
//! decided when a [`super::Resolution`] is split at the API boundary.

use super::{RepoId, Repository, ServiceType};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

/// Set of repositories keyed by their stable identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoSet {
    repos: BTreeMap<RepoId, Repository>,
}

impl RepoSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a repository; re-adding the same identifier keeps one entry.
    pub fn insert(&mut self, repo: Repository) {
        self.repos.insert(repo.id(), repo);
    }

    /// Returns whether a repository with the identifier of `repo` is present.
    #[must_use]
    pub fn contains(&self, repo: &Repository) -> bool {
        self.repos.contains_key(&repo.id())
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    /// Returns the number of repositories in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.repos.len()
    }

    /// Iterates repositories in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Repository> {
        self.repos.values()
    }

    fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.iter().map(|repo| repo.name().as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl FromIterator<Repository> for RepoSet {
    fn from_iter<I: IntoIterator<Item = Repository>>(iter: I) -> Self {
        let mut set = Self::new();
        for repo in iter {
            set.insert(repo);
        }
        set
    }
}

/// Repositories served from code hosts batch changes cannot publish to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnsupportedRepos(RepoSet);

impl UnsupportedRepos {
    /// Wraps a set of unsupported repositories.
    #[must_use]
    pub const fn new(repos: RepoSet) -> Self {
        Self(repos)
    }

    /// Returns the repositories.
    #[must_use]
    pub const fn repos(&self) -> &RepoSet {
        &self.0
    }

    /// Returns the distinct service types of the repositories.
    #[must_use]
    pub fn service_types(&self) -> BTreeSet<&ServiceType> {
        self.0.iter().map(Repository::service_type).collect()
    }
}

impl fmt::Display for UnsupportedRepos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&str> = self
            .service_types()
            .into_iter()
            .map(ServiceType::as_str)
            .collect();
        types.sort_unstable();
        write!(
            f,
            "found repositories on unsupported code hosts: {}\nrepositories:\n\t{}",
            types.join(", "),
            self.0.sorted_names().join("\n\t"),
        )
    }
}

/// Repositories that opted out of batch changes with an ignore marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoredRepos {
    repos: RepoSet,
    marker_path: String,
}

impl IgnoredRepos {
    /// Wraps a set of repositories found to contain `marker_path`.
    #[must_use]
    pub fn new(repos: RepoSet, marker_path: impl Into<String>) -> Self {
        Self {
            repos,
            marker_path: marker_path.into(),
        }
    }

    /// Returns the repositories.
    #[must_use]
    pub const fn repos(&self) -> &RepoSet {
        &self.repos
    }

    /// Returns the marker path the repositories contain.
    #[must_use]
    pub fn marker_path(&self) -> &str {
        &self.marker_path
    }
}

impl fmt::Display for IgnoredRepos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found repositories containing {} files:\n\t{}",
            self.marker_path,
            self.repos.sorted_names().join("\n\t"),
        )
    }
}

/// The single classification reported alongside a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Some repositories are on unsupported code hosts.
    Unsupported(UnsupportedRepos),
    /// Some repositories contain an ignore marker.
    Ignored(IgnoredRepos),
}

impl Classification {
    /// Picks the classification to report.
    ///
    /// Unsupported repositories take priority; ignored repositories are only
    /// reported when nothing is unsupported. `marker_path` names the ignore
    /// marker in the ignored report.
    #[must_use]
    pub fn select(unsupported: RepoSet, ignored: RepoSet, marker_path: &str) -> Option<Self> {
        if !unsupported.is_empty() {
            return Some(Self::Unsupported(UnsupportedRepos::new(unsupported)));
        }
        if !ignored.is_empty() {
            return Some(Self::Ignored(IgnoredRepos::new(ignored, marker_path)));
        }
        None
    }

    /// Exposes the classification as an error value.
    #[must_use]
    pub fn into_error(self) -> ClassificationError {
        match self {
            Self::Unsupported(repos) => ClassificationError::Unsupported(repos),
            Self::Ignored(repos) => ClassificationError::Ignored(repos),
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(repos) => repos.fmt(f),
            Self::Ignored(repos) => repos.fmt(f),
        }
    }
}

/// Soft failure accompanying a usable list of revisions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassificationError {
    /// Some repositories are on unsupported code hosts.
    #[error("{0}")]
    Unsupported(UnsupportedRepos),
    /// Some repositories contain an ignore marker.
    #[error("{0}")]
    Ignored(IgnoredRepos),
}

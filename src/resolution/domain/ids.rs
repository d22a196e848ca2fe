//! Identifier and validated scalar types for the resolution domain.

use super::ResolutionDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable numeric identifier of a repository in the store.
///
/// Deduplication and classification key on this value, never on the
/// in-memory [`super::Repository`] instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoId(u64);

impl RepoId {
    /// Creates a repository identifier from its raw value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Repository name as known to the store, e.g. `github.com/acme/widgets`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoName(String);

impl RepoName {
    /// Creates a validated repository name.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionDomainError::EmptyRepoName`] when the trimmed value
    /// is empty, or [`ResolutionDomainError::InvalidRepoName`] when it
    /// contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ResolutionDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(ResolutionDomainError::EmptyRepoName);
        }
        if normalized.chars().any(char::is_whitespace) {
            return Err(ResolutionDomainError::InvalidRepoName(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the repository name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RepoName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolved commit identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    /// Creates a validated commit identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionDomainError::InvalidCommitId`] when the trimmed
    /// value is empty or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ResolutionDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(ResolutionDomainError::InvalidCommitId(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the commit identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CommitId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-blank search query text, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    /// Creates a query.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionDomainError::MalformedDirective`] when the query is
    /// blank.
    pub fn new(value: impl Into<String>) -> Result<Self, ResolutionDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ResolutionDomainError::MalformedDirective);
        }
        Ok(Self(raw))
    }

    /// Returns the query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed, non-empty branch name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchName(String);

impl BranchName {
    /// Creates a branch name.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionDomainError::MalformedDirective`] when the trimmed
    /// value is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, ResolutionDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(ResolutionDomainError::MalformedDirective);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the branch name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

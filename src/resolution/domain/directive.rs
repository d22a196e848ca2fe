//! Batch spec `on` directives.

use super::{BranchName, Query, RepoName, ResolutionDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One instruction naming the repositories a batch change should target.
///
/// Payloads are validated on construction, so a blank query or branch cannot
/// be represented.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Directive {
    /// Every repository matched by a search query.
    SearchQuery(Query),
    /// A single repository on its default branch.
    RepoName(RepoName),
    /// A single repository on an explicit branch.
    RepoNameAndBranch(RepoName, BranchName),
}

impl Directive {
    /// Creates a search query directive.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionDomainError::MalformedDirective`] when the query is
    /// blank.
    pub fn search(query: impl Into<String>) -> Result<Self, ResolutionDomainError> {
        Ok(Self::SearchQuery(Query::new(query)?))
    }

    /// Creates a repository directive targeting the default branch.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolutionDomainError`] when the name is invalid.
    pub fn repository(name: impl Into<String>) -> Result<Self, ResolutionDomainError> {
        Ok(Self::RepoName(RepoName::new(name)?))
    }

    /// Creates a repository directive targeting an explicit branch.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolutionDomainError`] when the name is invalid, or
    /// [`ResolutionDomainError::MalformedDirective`] when the branch is blank.
    pub fn repository_branch(
        name: impl Into<String>,
        branch: impl Into<String>,
    ) -> Result<Self, ResolutionDomainError> {
        Ok(Self::RepoNameAndBranch(
            RepoName::new(name)?,
            BranchName::new(branch)?,
        ))
    }

    /// Converts a list of wire entries, stopping at the first malformed one.
    ///
    /// # Errors
    ///
    /// Returns the [`ResolutionDomainError`] of the first entry that does not
    /// form a valid directive.
    pub fn parse_all(
        entries: impl IntoIterator<Item = OnEntry>,
    ) -> Result<Vec<Self>, ResolutionDomainError> {
        entries.into_iter().map(Self::try_from).collect()
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SearchQuery(query) => write!(f, "{query}"),
            Self::RepoName(name) => write!(f, "repository:{name}"),
            Self::RepoNameAndBranch(name, branch) => write!(f, "repository:{name}@{branch}"),
        }
    }
}

/// Wire form of an `on` entry as it appears in a batch spec.
///
/// # Examples
///
///     use batch_targets::resolution::domain::{Directive, OnEntry};
///
///     let entry: OnEntry =
///         serde_json::from_str(r#"{"repository": "acme/widgets", "branch": "main"}"#)
///             .expect("valid json");
///     let directive = Directive::try_from(entry).expect("valid directive");
///     assert_eq!(directive.to_string(), "repository:acme/widgets@main");
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnEntry {
    /// Search query selecting repositories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repositories_matching_query: Option<String>,
    /// Explicit repository name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    /// Explicit branch; only valid together with `repository`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|text| !text.trim().is_empty())
}

impl TryFrom<OnEntry> for Directive {
    type Error = ResolutionDomainError;

    fn try_from(entry: OnEntry) -> Result<Self, Self::Error> {
        let query = non_blank(entry.repositories_matching_query.as_ref());
        let repository = non_blank(entry.repository.as_ref());
        let branch = non_blank(entry.branch.as_ref());

        match (query, repository, branch) {
            (Some(text), None, None) => Self::search(text),
            (None, Some(name), None) => Self::repository(name),
            (None, Some(name), Some(branch_name)) => Self::repository_branch(name, branch_name),
            _ => Err(ResolutionDomainError::MalformedDirective),
        }
    }
}

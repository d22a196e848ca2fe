//! Repositories pinned to a branch and commit.

use super::{CommitId, RepoId, Repository};
use serde::{Deserialize, Serialize};

/// A repository pinned to a branch and its resolved commit.
///
/// A revision without a branch is provisional: it describes a repository
/// with no usable default branch and never survives deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRevision {
    repo: Repository,
    branch: Option<String>,
    commit: Option<CommitId>,
}

impl RepoRevision {
    /// Creates a provisional revision with neither branch nor commit.
    #[must_use]
    pub const fn unresolved(repo: Repository) -> Self {
        Self {
            repo,
            branch: None,
            commit: None,
        }
    }

    /// Creates a revision pinned to `branch` at `commit`.
    #[must_use]
    pub fn new(repo: Repository, branch: impl Into<String>, commit: CommitId) -> Self {
        Self {
            repo,
            branch: Some(branch.into()),
            commit: Some(commit),
        }
    }

    /// Returns the repository.
    #[must_use]
    pub const fn repo(&self) -> &Repository {
        &self.repo
    }

    /// Returns the repository identifier used as deduplication key.
    #[must_use]
    pub const fn repo_id(&self) -> RepoId {
        self.repo.id()
    }

    /// Returns the branch, if any.
    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    /// Returns the resolved commit, if any.
    #[must_use]
    pub const fn commit(&self) -> Option<&CommitId> {
        self.commit.as_ref()
    }

    /// Returns whether the revision names a non-empty branch.
    #[must_use]
    pub fn has_branch(&self) -> bool {
        self.branch.as_deref().is_some_and(|branch| !branch.is_empty())
    }

    /// Sets the branch.
    #[must_use]
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Sets the commit.
    #[must_use]
    pub fn with_commit(mut self, commit: CommitId) -> Self {
        self.commit = Some(commit);
        self
    }

    /// Replaces branch and commit with those of `other`, keeping the
    /// repository record of `self`.
    pub fn overwrite_from(&mut self, other: Self) {
        self.branch = other.branch;
        self.commit = other.commit;
    }
}

//! Git server port.

use crate::resolution::domain::{CommitId, RepoName, Repository};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for git server operations.
pub type GitResult<T> = Result<T, GitError>;

/// Options for revision resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveRevisionOptions {
    /// Fetch from the code host when the revision is not present locally.
    pub ensure_revision: bool,
}

impl ResolveRevisionOptions {
    /// Resolves against what the git server already has.
    #[must_use]
    pub const fn local_only() -> Self {
        Self {
            ensure_revision: false,
        }
    }
}

/// Kind of a tree entry returned by [`GitServer::stat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Regular file (blob).
    Regular,
    /// Executable file.
    Executable,
    /// Directory (tree).
    Directory,
    /// Symbolic link.
    Symlink,
    /// Submodule (gitlink).
    Submodule,
}

/// Result of a file stat at a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    /// Path inside the repository.
    pub path: String,
    /// Entry kind.
    pub kind: FileKind,
}

impl FileStat {
    /// Creates a stat result.
    #[must_use]
    pub fn new(path: impl Into<String>, kind: FileKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Returns whether the entry is a blob, executable or not.
    #[must_use]
    pub const fn is_regular(&self) -> bool {
        matches!(self.kind, FileKind::Regular | FileKind::Executable)
    }
}

/// Read-only git operations against mirrored repositories.
#[async_trait]
pub trait GitServer: Send + Sync {
    /// Resolves a symbolic reference such as `HEAD` to the ref it points at.
    async fn resolve_symbolic_ref(&self, repo: &Repository, name: &str) -> GitResult<String>;

    /// Resolves a ref, branch or revision spec to a commit.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RevisionNotFound`] when the spec does not resolve.
    async fn resolve_revision(
        &self,
        repo: &Repository,
        spec: &str,
        options: ResolveRevisionOptions,
    ) -> GitResult<CommitId>;

    /// Stats `path` in the tree of `commit`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotExist`] when no entry exists at `path`.
    async fn stat(&self, repo: &Repository, commit: &CommitId, path: &str) -> GitResult<FileStat>;
}

/// Errors returned by git server implementations.
#[derive(Debug, Clone, Error)]
pub enum GitError {
    /// The revision spec does not resolve to a commit.
    #[error("revision not found: {repository}@{spec}")]
    RevisionNotFound {
        /// Repository name.
        repository: RepoName,
        /// Revision spec that failed to resolve.
        spec: String,
    },

    /// The path does not exist at the commit.
    #[error("file does not exist: {path}")]
    NotExist {
        /// Missing path.
        path: String,
    },

    /// The reference is not a symbolic reference, or does not exist.
    #[error("symbolic ref {name} not found in {repository}")]
    SymbolicRefNotFound {
        /// Repository name.
        repository: RepoName,
        /// Reference name.
        name: String,
    },

    /// Generic transport or command failure.
    #[error("git command failed: {0}")]
    Command(Arc<dyn std::error::Error + Send + Sync>),
}

impl GitError {
    /// Wraps a command or transport failure.
    pub fn command(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Command(Arc::new(err))
    }
}

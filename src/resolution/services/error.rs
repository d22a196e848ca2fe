//! Error taxonomy for repository resolution.

use crate::resolution::{
    domain::{RepoName, ResolutionDomainError},
    ports::{GitError, RepositoryStoreError, SearchError},
};
use thiserror::Error;

/// Failure resolving a single directive.
#[derive(Debug, Error)]
pub enum DirectiveError {
    /// The directive is neither a query nor a repository reference.
    #[error(transparent)]
    Malformed(#[from] ResolutionDomainError),

    /// No repository has the requested name.
    #[error("repository {0} not found")]
    RepoNotFound(RepoName),

    /// The requested branch does not exist in the repository.
    #[error("no branch matching {branch:?} found for repository {repository}")]
    BranchNotFound {
        /// Requested branch.
        branch: String,
        /// Repository the branch was looked up in.
        repository: RepoName,
    },

    /// A git server call failed.
    #[error(transparent)]
    Git(#[from] GitError),

    /// A repository store call failed.
    #[error(transparent)]
    Store(RepositoryStoreError),

    /// The search backend failed or reported an error.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// The caller cancelled resolution.
    #[error("resolution was cancelled")]
    Cancelled,
}

impl From<RepositoryStoreError> for DirectiveError {
    fn from(err: RepositoryStoreError) -> Self {
        match err {
            RepositoryStoreError::NotFound(name) => Self::RepoNotFound(name),
            other @ RepositoryStoreError::Persistence(_) => Self::Store(other),
        }
    }
}

/// Result type for resolving one directive.
pub type DirectiveResult<T> = Result<T, DirectiveError>;

/// Failure of one ignore-marker check.
#[derive(Debug, Error)]
pub enum IgnoreCheckError {
    /// The git server could not stat the marker.
    #[error("checking {repository} for an ignore marker: {source}")]
    Git {
        /// Repository being checked.
        repository: RepoName,
        /// Underlying git failure.
        #[source]
        source: GitError,
    },

    /// The marker path exists but is not a regular file.
    #[error("not a blob: {path:?}")]
    NotABlob {
        /// Repository being checked.
        repository: RepoName,
        /// Marker path.
        path: String,
    },

    /// The revision carries no commit to check.
    #[error("no commit resolved for repository {0}")]
    MissingCommit(RepoName),

    /// The check task panicked or was aborted.
    #[error("ignore marker check task failed: {0}")]
    Task(String),
}

/// Every ignore-marker check that failed during one resolution.
#[derive(Debug, Error)]
#[error("{}", render_failures(.0))]
pub struct IgnoreCheckErrors(Vec<IgnoreCheckError>);

impl IgnoreCheckErrors {
    /// Collects failures, ordering them by message for stable reporting.
    #[must_use]
    pub fn new(mut errors: Vec<IgnoreCheckError>) -> Self {
        errors.sort_by_cached_key(ToString::to_string);
        Self(errors)
    }

    /// Returns the individual failures.
    #[must_use]
    pub fn errors(&self) -> &[IgnoreCheckError] {
        &self.0
    }
}

fn render_failures(errors: &[IgnoreCheckError]) -> String {
    let noun = if errors.len() == 1 { "error" } else { "errors" };
    let mut rendered = format!("{} {noun} occurred:", errors.len());
    for err in errors {
        rendered.push_str("\n\t* ");
        rendered.push_str(&err.to_string());
    }
    rendered
}

/// Hard failure of a resolution call; no revisions are returned.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// A directive failed; later directives were not attempted.
    #[error("resolving {directive:?}: {source}")]
    Directive {
        /// Textual form of the failing directive.
        directive: String,
        /// Underlying failure.
        #[source]
        source: DirectiveError,
    },

    /// One or more ignore-marker checks failed.
    #[error(transparent)]
    IgnoreCheck(#[from] IgnoreCheckErrors),

    /// The caller cancelled resolution.
    #[error("repository resolution was cancelled")]
    Cancelled,
}

/// Result type for resolution calls.
pub type ResolutionResult<T> = Result<T, ResolutionError>;

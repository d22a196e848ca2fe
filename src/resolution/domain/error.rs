//! Error types for resolution domain validation.

use thiserror::Error;

/// Errors returned while constructing resolution domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolutionDomainError {
    /// The repository name is empty after trimming.
    #[error("repository name must not be empty")]
    EmptyRepoName,

    /// The repository name contains characters that cannot appear in a name.
    #[error("invalid repository name '{0}'")]
    InvalidRepoName(String),

    /// The commit identifier is empty or contains whitespace.
    #[error("invalid commit id '{0}'")]
    InvalidCommitId(String),

    /// An `on` entry names neither a query nor a repository, or mixes them.
    #[error("malformed 'on' field; missing either a repository name or a query")]
    MalformedDirective,
}

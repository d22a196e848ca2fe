//! Domain model for repository resolution.
//!
//! Directives, repositories, revisions and classifications are plain values;
//! all infrastructure access happens through the ports.

mod classification;
mod directive;
mod error;
mod host;
mod ids;
mod repository;
mod resolution;
mod revision;

pub use classification::{
    Classification, ClassificationError, IgnoredRepos, RepoSet, UnsupportedRepos,
};
pub use directive::{Directive, OnEntry};
pub use error::ResolutionDomainError;
pub use host::ServiceType;
pub use ids::{BranchName, CommitId, Query, RepoId, RepoName};
pub use repository::Repository;
pub use resolution::{Resolution, ResolutionOptions};
pub use revision::RepoRevision;

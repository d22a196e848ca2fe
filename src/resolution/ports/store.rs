//! Repository store port.

use crate::resolution::domain::{RepoId, RepoName, Repository};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for repository store operations.
pub type RepositoryStoreResult<T> = Result<T, RepositoryStoreError>;

/// Read access to repository records.
#[async_trait]
pub trait RepositoryStore: Send + Sync {
    /// Looks up a repository by exact name.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryStoreError::NotFound`] when no repository has the
    /// given name.
    async fn get_by_name(&self, name: &RepoName) -> RepositoryStoreResult<Repository>;

    /// Returns the repositories among `ids` that the current caller may see.
    ///
    /// Inaccessible or unknown identifiers are silently omitted.
    async fn list_accessible(&self, ids: &[RepoId]) -> RepositoryStoreResult<Vec<Repository>>;
}

/// Errors returned by repository store implementations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryStoreError {
    /// No repository has the given name.
    #[error("repository not found: {0}")]
    NotFound(RepoName),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RepositoryStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

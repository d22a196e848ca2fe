//! In-memory repository store.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::resolution::{
    domain::{RepoId, RepoName, Repository},
    ports::{RepositoryStore, RepositoryStoreError, RepositoryStoreResult},
};

/// Thread-safe in-memory repository store.
///
/// Repositories can be hidden to model repositories the caller has no access
/// to: hidden repositories are neither found by name nor listed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepositoryStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    repos: BTreeMap<RepoId, Repository>,
    hidden: HashSet<RepoId>,
}

fn lock_error(message: String) -> RepositoryStoreError {
    RepositoryStoreError::persistence(std::io::Error::other(message))
}

impl InMemoryRepositoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a repository.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when lock acquisition fails.
    pub fn insert(&self, repo: Repository) -> RepositoryStoreResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(err.to_string()))?;
        state.repos.insert(repo.id(), repo);
        Ok(())
    }

    /// Hides a repository from the current caller.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when lock acquisition fails.
    pub fn hide(&self, id: RepoId) -> RepositoryStoreResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(err.to_string()))?;
        state.hidden.insert(id);
        Ok(())
    }
}

#[async_trait]
impl RepositoryStore for InMemoryRepositoryStore {
    async fn get_by_name(&self, name: &RepoName) -> RepositoryStoreResult<Repository> {
        let state = self.state.read().map_err(|err| lock_error(err.to_string()))?;
        state
            .repos
            .values()
            .find(|repo| repo.name() == name && !state.hidden.contains(&repo.id()))
            .cloned()
            .ok_or_else(|| RepositoryStoreError::NotFound(name.clone()))
    }

    async fn list_accessible(&self, ids: &[RepoId]) -> RepositoryStoreResult<Vec<Repository>> {
        let state = self.state.read().map_err(|err| lock_error(err.to_string()))?;
        let mut seen = HashSet::new();
        Ok(ids
            .iter()
            .filter(|id| !state.hidden.contains(id) && seen.insert(**id))
            .filter_map(|id| state.repos.get(id).cloned())
            .collect())
    }
}

//! In-memory git server.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::resolution::{
    domain::{CommitId, RepoId, RepoName, Repository},
    ports::{FileKind, FileStat, GitError, GitResult, GitServer, ResolveRevisionOptions},
};

/// A recorded call to [`GitServer::resolve_revision`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionCall {
    /// Repository the revision was resolved in.
    pub repository: RepoName,
    /// Requested revision spec.
    pub spec: String,
    /// Options passed by the caller.
    pub options: ResolveRevisionOptions,
}

/// In-memory git server adapter.
///
/// Holds symbolic `HEAD` targets, refs and tree entries per repository, and
/// can inject failures and latency into file stats. It also records the
/// highest number of stats observed in flight at once.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGitServer {
    state: Arc<RwLock<InMemoryGitState>>,
    stats_in_flight: Arc<AtomicUsize>,
    max_stats_in_flight: Arc<AtomicUsize>,
}

#[derive(Debug, Default)]
struct InMemoryGitState {
    heads: HashMap<RepoId, String>,
    refs: HashMap<RepoId, HashMap<String, CommitId>>,
    files: HashMap<(RepoId, CommitId, String), FileKind>,
    stat_failures: HashMap<RepoId, String>,
    revision_failures: HashMap<RepoId, String>,
    stat_delay: Option<Duration>,
    revision_calls: Vec<RevisionCall>,
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

fn lock_error(message: String) -> GitError {
    GitError::command(std::io::Error::other(message))
}

impl InMemoryGitServer {
    /// Creates an empty git server.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write_state<T>(&self, f: impl FnOnce(&mut InMemoryGitState) -> T) -> GitResult<T> {
        let mut state = self.state.write().map_err(|err| lock_error(err.to_string()))?;
        Ok(f(&mut state))
    }

    /// Points the repository's `HEAD` at `ref_name`.
    ///
    /// # Errors
    ///
    /// Returns a command error when lock acquisition fails.
    pub fn set_head(&self, repo_id: RepoId, ref_name: impl Into<String>) -> GitResult<()> {
        let ref_name = ref_name.into();
        self.write_state(|state| {
            state.heads.insert(repo_id, ref_name);
        })
    }

    /// Points `name` at `commit` in the repository.
    ///
    /// # Errors
    ///
    /// Returns a command error when lock acquisition fails.
    pub fn set_ref(&self, repo_id: RepoId, name: impl Into<String>, commit: CommitId) -> GitResult<()> {
        let name = name.into();
        self.write_state(|state| {
            state.refs.entry(repo_id).or_default().insert(name, commit);
        })
    }

    /// Adds a tree entry at `path` in `commit`.
    ///
    /// # Errors
    ///
    /// Returns a command error when lock acquisition fails.
    pub fn add_file(
        &self,
        repo_id: RepoId,
        commit: CommitId,
        path: impl Into<String>,
        kind: FileKind,
    ) -> GitResult<()> {
        let path = path.into();
        self.write_state(|state| {
            state.files.insert((repo_id, commit, path), kind);
        })
    }

    /// Makes every stat in the repository fail with `message`.
    ///
    /// # Errors
    ///
    /// Returns a command error when lock acquisition fails.
    pub fn fail_stat(&self, repo_id: RepoId, message: impl Into<String>) -> GitResult<()> {
        let message = message.into();
        self.write_state(|state| {
            state.stat_failures.insert(repo_id, message);
        })
    }

    /// Makes every revision resolution in the repository fail with `message`.
    ///
    /// # Errors
    ///
    /// Returns a command error when lock acquisition fails.
    pub fn fail_revision(&self, repo_id: RepoId, message: impl Into<String>) -> GitResult<()> {
        let message = message.into();
        self.write_state(|state| {
            state.revision_failures.insert(repo_id, message);
        })
    }

    /// Delays every stat by `delay`.
    ///
    /// # Errors
    ///
    /// Returns a command error when lock acquisition fails.
    pub fn set_stat_delay(&self, delay: Duration) -> GitResult<()> {
        self.write_state(|state| {
            state.stat_delay = Some(delay);
        })
    }

    /// Returns every recorded revision resolution, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a command error when lock acquisition fails.
    pub fn revision_calls(&self) -> GitResult<Vec<RevisionCall>> {
        let state = self.state.read().map_err(|err| lock_error(err.to_string()))?;
        Ok(state.revision_calls.clone())
    }

    /// Returns the highest number of stats that were in flight at once.
    #[must_use]
    pub fn max_concurrent_stats(&self) -> usize {
        self.max_stats_in_flight.load(Ordering::SeqCst)
    }

    fn lookup_stat(&self, repo: &Repository, commit: &CommitId, path: &str) -> GitResult<FileStat> {
        let state = self.state.read().map_err(|err| lock_error(err.to_string()))?;
        if let Some(message) = state.stat_failures.get(&repo.id()) {
            return Err(lock_error(message.clone()));
        }
        state
            .files
            .get(&(repo.id(), commit.clone(), path.to_owned()))
            .map(|kind| FileStat::new(path, *kind))
            .ok_or_else(|| GitError::NotExist {
                path: path.to_owned(),
            })
    }
}

#[async_trait]
impl GitServer for InMemoryGitServer {
    async fn resolve_symbolic_ref(&self, repo: &Repository, name: &str) -> GitResult<String> {
        let state = self.state.read().map_err(|err| lock_error(err.to_string()))?;
        state
            .heads
            .get(&repo.id())
            .filter(|_| name == "HEAD")
            .cloned()
            .ok_or_else(|| GitError::SymbolicRefNotFound {
                repository: repo.name().clone(),
                name: name.to_owned(),
            })
    }

    async fn resolve_revision(
        &self,
        repo: &Repository,
        spec: &str,
        options: ResolveRevisionOptions,
    ) -> GitResult<CommitId> {
        let mut state = self.state.write().map_err(|err| lock_error(err.to_string()))?;
        state.revision_calls.push(RevisionCall {
            repository: repo.name().clone(),
            spec: spec.to_owned(),
            options,
        });
        if let Some(message) = state.revision_failures.get(&repo.id()) {
            return Err(lock_error(message.clone()));
        }

        let target = if spec == "HEAD" {
            state.heads.get(&repo.id()).cloned()
        } else {
            Some(spec.to_owned())
        };
        target
            .and_then(|name| state.refs.get(&repo.id())?.get(&name).cloned())
            .ok_or_else(|| GitError::RevisionNotFound {
                repository: repo.name().clone(),
                spec: spec.to_owned(),
            })
    }

    async fn stat(&self, repo: &Repository, commit: &CommitId, path: &str) -> GitResult<FileStat> {
        let current = self.stats_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _in_flight = InFlight(&self.stats_in_flight);
        self.max_stats_in_flight.fetch_max(current, Ordering::SeqCst);

        let delay = {
            let state = self.state.read().map_err(|err| lock_error(err.to_string()))?;
            state.stat_delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.lookup_stat(repo, commit, path)
    }
}

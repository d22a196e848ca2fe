//! Shared test helpers for in-memory resolution integration tests.

use std::sync::Arc;

use batch_targets::resolution::{
    adapters::memory::{InMemoryGitServer, InMemoryRepositoryStore, InMemorySearchClient},
    domain::{CommitId, RepoId, RepoName, Repository, ServiceType},
    services::RepositoryResolutionService,
};
use rstest::fixture;
use std::io;
use tokio::runtime::Runtime;

/// Service type wired to the in-memory adapters.
pub type InMemoryService =
    RepositoryResolutionService<InMemoryRepositoryStore, InMemoryGitServer, InMemorySearchClient>;

/// Boxed error used by integration tests.
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Provides a tokio runtime for async operations in tests.
///
/// The runtime is multi-threaded because ignore checks run on spawned tasks.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
}

/// A code host populated through the in-memory adapters.
pub struct Host {
    pub store: Arc<InMemoryRepositoryStore>,
    pub git: Arc<InMemoryGitServer>,
    pub search: Arc<InMemorySearchClient>,
}

impl Host {
    /// Builds a resolution service over this host.
    pub fn service(&self) -> InMemoryService {
        RepositoryResolutionService::new(
            Arc::clone(&self.store),
            Arc::clone(&self.git),
            Arc::clone(&self.search),
        )
    }

    /// Registers a repository whose `HEAD` is `refs/heads/main` at `commit`.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is invalid or an adapter rejects it.
    pub fn repo(&self, id: u64, name: &str, host: &str, commit: &str) -> TestResult<Repository> {
        let repo = Repository::new(RepoId::new(id), RepoName::new(name)?, ServiceType::from(host));
        self.store.insert(repo.clone())?;
        self.git.set_head(repo.id(), "refs/heads/main")?;
        self.git
            .set_ref(repo.id(), "refs/heads/main", CommitId::new(commit)?)?;
        Ok(repo)
    }
}

/// Provides an empty in-memory host.
#[fixture]
pub fn host() -> Host {
    Host {
        store: Arc::new(InMemoryRepositoryStore::new()),
        git: Arc::new(InMemoryGitServer::new()),
        search: Arc::new(InMemorySearchClient::new()),
    }
}

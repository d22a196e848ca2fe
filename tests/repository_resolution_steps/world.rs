//! World state for repository resolution BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use batch_targets::resolution::{
    adapters::memory::{InMemoryGitServer, InMemoryRepositoryStore, InMemorySearchClient},
    domain::{Directive, RepoId, Repository, Resolution},
    services::{RepositoryResolutionService, ResolutionResult},
};
use eyre::eyre;
use rstest::fixture;

pub type TestResolutionService =
    RepositoryResolutionService<InMemoryRepositoryStore, InMemoryGitServer, InMemorySearchClient>;

/// World state for resolution BDD tests.
pub struct ResolutionWorld {
    pub store: Arc<InMemoryRepositoryStore>,
    pub git: Arc<InMemoryGitServer>,
    pub search: Arc<InMemorySearchClient>,
    pub service: TestResolutionService,
    pub repos: HashMap<String, Repository>,
    pub search_matches: HashMap<String, Vec<RepoId>>,
    pub directives: Vec<Directive>,
    pub outcome: Option<ResolutionResult<Resolution>>,
}

impl Default for ResolutionWorld {
    fn default() -> Self {
        let store = Arc::new(InMemoryRepositoryStore::new());
        let git = Arc::new(InMemoryGitServer::new());
        let search = Arc::new(InMemorySearchClient::new());

        let service = RepositoryResolutionService::new(
            Arc::clone(&store),
            Arc::clone(&git),
            Arc::clone(&search),
        );

        Self {
            store,
            git,
            search,
            service,
            repos: HashMap::new(),
            search_matches: HashMap::new(),
            directives: Vec::new(),
            outcome: None,
        }
    }
}

impl ResolutionWorld {
    /// Looks up a repository registered by an earlier step.
    pub fn repo(&self, name: &str) -> Result<&Repository, eyre::Report> {
        self.repos
            .get(name)
            .ok_or_else(|| eyre!("repository {name} was not registered"))
    }

    /// Returns the successful resolution recorded by the `when` step.
    pub fn resolution(&self) -> Result<&Resolution, eyre::Report> {
        match &self.outcome {
            Some(Ok(resolution)) => Ok(resolution),
            Some(Err(err)) => Err(eyre!("resolution failed: {err}")),
            None => Err(eyre!("targets have not been resolved")),
        }
    }
}

#[fixture]
pub fn world() -> ResolutionWorld {
    ResolutionWorld::default()
}

pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

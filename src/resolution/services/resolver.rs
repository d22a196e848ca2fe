//! Service layer resolving batch spec directives into repository revisions.

use super::{
    config::ResolverConfig,
    dedup::RevisionSet,
    error::{DirectiveError, DirectiveResult, ResolutionError, ResolutionResult},
    ignore::check_ignore_markers,
    outcome::build_resolution,
    query::augment_query,
};
use crate::resolution::{
    domain::{
        Directive, RepoId, RepoName, RepoRevision, Repository, Resolution, ResolutionOptions,
    },
    ports::{
        GitError, GitServer, RepositoryStore, ResolveRevisionOptions, SearchClient, SearchError,
        SearchEvent, SearchMatch,
    },
};
use futures::{StreamExt, TryStreamExt};
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

/// Symbolic reference naming a repository's default branch.
const HEAD: &str = "HEAD";

/// Races a collaborator call against cancellation.
async fn cancellable<T, E>(
    cancel: &CancellationToken,
    operation: impl Future<Output = Result<T, E>>,
) -> DirectiveResult<T>
where
    DirectiveError: From<E>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(DirectiveError::Cancelled),
        result = operation => result.map_err(DirectiveError::from),
    }
}

/// Repository resolution orchestration service.
///
/// Walks directives in order, merges their revisions last-write-wins,
/// checks every surviving repository for an ignore marker, and excludes
/// repositories on unsupported code hosts.
#[derive(Clone)]
pub struct RepositoryResolutionService<S, G, Q>
where
    S: RepositoryStore,
    G: GitServer + 'static,
    Q: SearchClient,
{
    store: Arc<S>,
    git: Arc<G>,
    search: Arc<Q>,
    config: ResolverConfig,
}

impl<S, G, Q> RepositoryResolutionService<S, G, Q>
where
    S: RepositoryStore,
    G: GitServer + 'static,
    Q: SearchClient,
{
    /// Creates a resolution service with the default configuration.
    #[must_use]
    pub fn new(store: Arc<S>, git: Arc<G>, search: Arc<Q>) -> Self {
        Self {
            store,
            git,
            search,
            config: ResolverConfig::default(),
        }
    }

    /// Replaces the service configuration.
    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the service configuration.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves directives into the revisions a batch change runs on.
    ///
    /// A successful call may still carry a classification naming
    /// repositories that were excluded; see [`Resolution::into_parts`].
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::Directive`] for the first directive that
    /// fails (later directives are not attempted),
    /// [`ResolutionError::IgnoreCheck`] when any ignore-marker check fails,
    /// and [`ResolutionError::Cancelled`] when `cancel` fires.
    #[instrument(skip_all, fields(directives = directives.len(), ?options), err)]
    pub async fn resolve(
        &self,
        directives: &[Directive],
        options: ResolutionOptions,
        cancel: &CancellationToken,
    ) -> ResolutionResult<Resolution> {
        let revisions = self.walk(directives, cancel).await?;
        debug!(repositories = revisions.len(), "deduplicated directive results");

        let checks = check_ignore_markers(
            &self.git,
            revisions.into_revisions(),
            &self.config.ignore_marker_path,
            self.config.ignore_check_limit(),
            cancel,
        )
        .await?;
        Ok(build_resolution(
            checks,
            options,
            &self.config.ignore_marker_path,
        ))
    }

    /// Resolves directives in order into a deduplicated revision set.
    ///
    /// # Errors
    ///
    /// Returns the failure of the first directive that cannot be resolved.
    pub async fn walk(
        &self,
        directives: &[Directive],
        cancel: &CancellationToken,
    ) -> ResolutionResult<RevisionSet> {
        let mut seen = RevisionSet::new();
        for directive in directives {
            let revisions =
                self.resolve_directive(directive, cancel)
                    .await
                    .map_err(|source| match source {
                        DirectiveError::Cancelled => ResolutionError::Cancelled,
                        other => ResolutionError::Directive {
                            directive: directive.to_string(),
                            source: other,
                        },
                    })?;
            seen.extend(revisions);
        }
        Ok(seen)
    }

    /// Resolves one directive into provisional revisions.
    ///
    /// # Errors
    ///
    /// Returns a [`DirectiveError`] describing why the directive failed.
    #[instrument(skip_all, fields(directive = %directive), err)]
    pub async fn resolve_directive(
        &self,
        directive: &Directive,
        cancel: &CancellationToken,
    ) -> DirectiveResult<Vec<RepoRevision>> {
        match directive {
            Directive::SearchQuery(query) => self.resolve_search(query.as_str(), cancel).await,
            Directive::RepoNameAndBranch(name, branch) => Ok(vec![
                self.resolve_name_and_branch(name, branch.as_str(), cancel)
                    .await?,
            ]),
            Directive::RepoName(name) => Ok(vec![self.resolve_name(name, cancel).await?]),
        }
    }

    /// Resolves a repository name to its default branch.
    ///
    /// A repository whose `HEAD` cannot be resolved yields a revision
    /// without a branch rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::RepoNotFound`] when the store has no such
    /// repository, or a git error when the default branch exists but cannot
    /// be resolved to a commit.
    #[instrument(skip_all, fields(name = %name), err)]
    pub async fn resolve_name(
        &self,
        name: &RepoName,
        cancel: &CancellationToken,
    ) -> DirectiveResult<RepoRevision> {
        let repo = cancellable(cancel, self.store.get_by_name(name)).await?;
        self.default_revision(repo, cancel).await
    }

    /// Resolves a repository name and an explicit branch.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::BranchNotFound`] when the branch does not
    /// exist, [`DirectiveError::RepoNotFound`] when the repository does not.
    #[instrument(skip_all, fields(name = %name, branch = branch), err)]
    pub async fn resolve_name_and_branch(
        &self,
        name: &RepoName,
        branch: &str,
        cancel: &CancellationToken,
    ) -> DirectiveResult<RepoRevision> {
        let repo = cancellable(cancel, self.store.get_by_name(name)).await?;
        let resolved = cancellable(
            cancel,
            self.git
                .resolve_revision(&repo, branch, ResolveRevisionOptions::local_only()),
        )
        .await;

        match resolved {
            Ok(commit) => Ok(RepoRevision::new(repo, branch, commit)),
            Err(DirectiveError::Git(GitError::RevisionNotFound { .. })) => {
                Err(DirectiveError::BranchNotFound {
                    branch: branch.to_owned(),
                    repository: name.clone(),
                })
            }
            Err(err) => Err(err),
        }
    }

    /// Resolves every accessible repository matched by a search query to
    /// its default branch.
    ///
    /// Results follow the order in which the store returns repositories.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::Search`] when the search fails or reports an
    /// error event, and the first failure of any default-branch lookup.
    #[instrument(skip_all, fields(query = query), err)]
    pub async fn resolve_search(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> DirectiveResult<Vec<RepoRevision>> {
        let augmented = augment_query(query);
        let repo_ids = self.search_repo_ids(&augmented, cancel).await?;
        let repos = cancellable(cancel, self.store.list_accessible(&repo_ids)).await?;
        debug!(
            matched = repo_ids.len(),
            accessible = repos.len(),
            "search matched repositories"
        );

        futures::stream::iter(repos)
            .map(|repo| self.default_revision(repo, cancel))
            .buffered(self.config.query_resolution_limit())
            .try_collect()
            .await
    }

    async fn search_repo_ids(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> DirectiveResult<Vec<RepoId>> {
        let mut events = cancellable(cancel, self.search.stream(query)).await?;
        let mut seen = HashSet::new();
        let mut repo_ids = Vec::new();

        loop {
            let next = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(DirectiveError::Cancelled),
                next = events.next() => next,
            };
            let Some(event) = next else {
                break;
            };
            match event {
                SearchEvent::Matches(matches) => {
                    let ids = matches.iter().filter_map(SearchMatch::repository_id);
                    for id in ids {
                        if seen.insert(id) {
                            repo_ids.push(id);
                        }
                    }
                }
                SearchEvent::Error { message } => {
                    warn!(%message, "search stream reported an error");
                    return Err(SearchError::Stream(message).into());
                }
                SearchEvent::Progress(_) | SearchEvent::Alert { .. } => {}
            }
        }
        Ok(repo_ids)
    }

    #[instrument(skip_all, fields(repo = %repo.name()), err)]
    async fn default_revision(
        &self,
        repo: Repository,
        cancel: &CancellationToken,
    ) -> DirectiveResult<RepoRevision> {
        let head = match cancellable(cancel, self.git.resolve_symbolic_ref(&repo, HEAD)).await {
            Ok(head) => head.trim().to_owned(),
            Err(DirectiveError::Cancelled) => return Err(DirectiveError::Cancelled),
            Err(err) => {
                debug!(%err, "repository has no resolvable default branch");
                return Ok(RepoRevision::unresolved(repo));
            }
        };
        if head.is_empty() {
            return Ok(RepoRevision::unresolved(repo));
        }

        let commit = cancellable(
            cancel,
            self.git
                .resolve_revision(&repo, &head, ResolveRevisionOptions::local_only()),
        )
        .await?;
        Ok(RepoRevision::new(repo, head, commit))
    }
}

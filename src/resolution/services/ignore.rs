//! Concurrent ignore-marker checks.
//!
//! One task per revision stats the marker path at the revision's commit.
//! Tasks run under a semaphore and report back through a `JoinSet`, which
//! is drained by a single consumer; no state is shared between tasks.

use super::error::{IgnoreCheckError, IgnoreCheckErrors, ResolutionError, ResolutionResult};
use crate::resolution::{
    domain::RepoRevision,
    ports::{GitError, GitServer},
};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

/// A revision together with the outcome of its marker check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerCheck {
    /// Checked revision.
    pub revision: RepoRevision,
    /// Whether the marker file exists at the revision's commit.
    pub has_marker: bool,
}

enum TaskOutcome {
    Checked(MarkerCheck),
    Failed(IgnoreCheckError),
    Cancelled,
}

/// Checks every revision for the ignore marker with at most `limit` checks
/// in flight.
///
/// All launched checks are joined before returning. Failures are collected
/// into one [`IgnoreCheckErrors`]; no partial result is returned.
///
/// # Errors
///
/// Returns [`ResolutionError::IgnoreCheck`] when any check failed, or
/// [`ResolutionError::Cancelled`] when `cancel` fired.
#[instrument(skip_all, fields(repositories = revisions.len(), limit = limit), err)]
pub async fn check_ignore_markers<G>(
    git: &Arc<G>,
    revisions: Vec<RepoRevision>,
    marker_path: &str,
    limit: usize,
    cancel: &CancellationToken,
) -> ResolutionResult<Vec<MarkerCheck>>
where
    G: GitServer + 'static,
{
    let permits = Arc::new(Semaphore::new(limit.max(1)));
    let marker_path: Arc<str> = Arc::from(marker_path);
    let mut tasks = JoinSet::new();

    for revision in revisions {
        let acquired = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            acquired = Arc::clone(&permits).acquire_owned() => acquired,
        };
        let Ok(permit) = acquired else {
            break;
        };

        let task_git = Arc::clone(git);
        let task_path = Arc::clone(&marker_path);
        let task_cancel = cancel.clone();
        tasks.spawn(async move {
            let _permit = permit;
            let result = tokio::select! {
                biased;
                () = task_cancel.cancelled() => None,
                result = has_ignore_marker(task_git.as_ref(), &revision, &task_path) => Some(result),
            };
            match result {
                None => TaskOutcome::Cancelled,
                Some(Ok(has_marker)) => TaskOutcome::Checked(MarkerCheck {
                    revision,
                    has_marker,
                }),
                Some(Err(err)) => TaskOutcome::Failed(err),
            }
        });
    }

    let mut checks = Vec::new();
    let mut failures = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(TaskOutcome::Checked(check)) => checks.push(check),
            Ok(TaskOutcome::Failed(err)) => failures.push(err),
            Ok(TaskOutcome::Cancelled) => {}
            Err(err) => failures.push(IgnoreCheckError::Task(err.to_string())),
        }
    }

    if cancel.is_cancelled() {
        return Err(ResolutionError::Cancelled);
    }
    if !failures.is_empty() {
        return Err(IgnoreCheckErrors::new(failures).into());
    }
    Ok(checks)
}

/// Returns whether a regular file exists at `marker_path` in the revision.
///
/// # Errors
///
/// Returns [`IgnoreCheckError::NotABlob`] when the path exists but is not a
/// regular file, and [`IgnoreCheckError::Git`] for any stat failure other
/// than the path not existing.
#[instrument(
    skip_all,
    fields(repo = %revision.repo().name(), branch = revision.branch().unwrap_or_default()),
    err
)]
pub async fn has_ignore_marker<G>(
    git: &G,
    revision: &RepoRevision,
    marker_path: &str,
) -> Result<bool, IgnoreCheckError>
where
    G: GitServer + ?Sized,
{
    let repo = revision.repo();
    let commit = revision
        .commit()
        .ok_or_else(|| IgnoreCheckError::MissingCommit(repo.name().clone()))?;

    match git.stat(repo, commit, marker_path).await {
        Ok(stat) if stat.is_regular() => {
            debug!("ignore marker present");
            Ok(true)
        }
        Ok(_) => Err(IgnoreCheckError::NotABlob {
            repository: repo.name().clone(),
            path: marker_path.to_owned(),
        }),
        Err(GitError::NotExist { .. }) => Ok(false),
        Err(source) => Err(IgnoreCheckError::Git {
            repository: repo.name().clone(),
            source,
        }),
    }
}

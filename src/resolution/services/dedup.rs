//! Deduplication of resolved revisions.

use crate::resolution::domain::{RepoId, RepoRevision};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::debug;

/// Revisions keyed by repository identifier.
///
/// Later revisions of a repository overwrite the branch and commit of
/// earlier ones; revisions without a branch are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionSet {
    revisions: BTreeMap<RepoId, RepoRevision>,
}

impl RevisionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one revision into the set.
    pub fn insert(&mut self, revision: RepoRevision) {
        if !revision.has_branch() {
            debug!(repo = %revision.repo().name(), "skipping repository without a branch");
            return;
        }

        match self.revisions.entry(revision.repo_id()) {
            Entry::Vacant(slot) => {
                slot.insert(revision);
            }
            Entry::Occupied(mut slot) => {
                debug!(
                    repo = %revision.repo().name(),
                    branch = revision.branch().unwrap_or_default(),
                    "overwriting previously resolved revision"
                );
                slot.get_mut().overwrite_from(revision);
            }
        }
    }

    /// Returns the number of repositories in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }

    /// Returns the revision stored for `id`.
    #[must_use]
    pub fn get(&self, id: RepoId) -> Option<&RepoRevision> {
        self.revisions.get(&id)
    }

    /// Consumes the set, yielding revisions in identifier order.
    #[must_use]
    pub fn into_revisions(self) -> Vec<RepoRevision> {
        self.revisions.into_values().collect()
    }
}

impl Extend<RepoRevision> for RevisionSet {
    fn extend<I: IntoIterator<Item = RepoRevision>>(&mut self, iter: I) {
        for revision in iter {
            self.insert(revision);
        }
    }
}

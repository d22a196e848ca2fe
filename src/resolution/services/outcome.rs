//! Assembly of the final resolution from marker checks.

use super::ignore::MarkerCheck;
use crate::resolution::domain::{
    Classification, RepoRevision, RepoSet, Resolution, ResolutionOptions,
};
use tracing::debug;

/// Partitions checked revisions into kept, unsupported and ignored.
///
/// A revision is dropped when it is on an unsupported code host or carries
/// the ignore marker, unless the matching `allow_*` option is set. Both
/// exclusions always apply; only one of them is reported.
#[must_use]
pub fn build_resolution(
    checks: Vec<MarkerCheck>,
    options: ResolutionOptions,
    marker_path: &str,
) -> Resolution {
    let mut unsupported = RepoSet::new();
    let mut ignored = RepoSet::new();
    let mut revisions: Vec<RepoRevision> = Vec::with_capacity(checks.len());

    for MarkerCheck {
        revision,
        has_marker,
    } in checks
    {
        let repo = revision.repo();
        let is_unsupported =
            !options.allow_unsupported && !repo.service_type().is_supported();
        let is_ignored = !options.allow_ignored && has_marker;

        if is_unsupported {
            debug!(repo = %repo.name(), service_type = %repo.service_type(), "unsupported code host");
            unsupported.insert(repo.clone());
        }
        if is_ignored {
            debug!(repo = %repo.name(), "repository ignored by marker");
            ignored.insert(repo.clone());
        }
        if !is_unsupported && !is_ignored {
            revisions.push(revision);
        }
    }

    revisions.sort_by_key(RepoRevision::repo_id);
    Resolution::new(revisions, Classification::select(unsupported, ignored, marker_path))
}

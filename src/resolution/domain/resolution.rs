//! Resolution policy and outcome.

use super::{Classification, ClassificationError, RepoRevision};
use serde::{Deserialize, Serialize};

/// Policy knobs for a single resolution call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionOptions {
    /// Keep repositories containing an ignore marker.
    #[serde(default)]
    pub allow_ignored: bool,
    /// Keep repositories hosted on unsupported code hosts.
    #[serde(default)]
    pub allow_unsupported: bool,
}

impl ResolutionOptions {
    /// Options that exclude both ignored and unsupported repositories.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            allow_ignored: false,
            allow_unsupported: false,
        }
    }

    /// Sets whether ignored repositories are kept.
    #[must_use]
    pub const fn with_allow_ignored(mut self, allow: bool) -> Self {
        self.allow_ignored = allow;
        self
    }

    /// Sets whether repositories on unsupported code hosts are kept.
    #[must_use]
    pub const fn with_allow_unsupported(mut self, allow: bool) -> Self {
        self.allow_unsupported = allow;
        self
    }
}

/// Final revisions plus the classification reported for excluded repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    revisions: Vec<RepoRevision>,
    classification: Option<Classification>,
}

impl Resolution {
    /// Creates a resolution outcome.
    #[must_use]
    pub const fn new(revisions: Vec<RepoRevision>, classification: Option<Classification>) -> Self {
        Self {
            revisions,
            classification,
        }
    }

    /// Returns the revisions to run on, in no particular order.
    #[must_use]
    pub fn revisions(&self) -> &[RepoRevision] {
        &self.revisions
    }

    /// Returns the reported classification, if any.
    #[must_use]
    pub const fn classification(&self) -> Option<&Classification> {
        self.classification.as_ref()
    }

    /// Splits into the usable revisions and the soft error to surface.
    #[must_use]
    pub fn into_parts(self) -> (Vec<RepoRevision>, Option<ClassificationError>) {
        (
            self.revisions,
            self.classification.map(Classification::into_error),
        )
    }
}

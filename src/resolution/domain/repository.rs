//! Repository records as returned by the store.

use super::{RepoId, RepoName, ServiceType};
use serde::{Deserialize, Serialize};

/// A repository known to the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repository {
    id: RepoId,
    name: RepoName,
    service_type: ServiceType,
}

impl Repository {
    /// Creates a repository record.
    #[must_use]
    pub const fn new(id: RepoId, name: RepoName, service_type: ServiceType) -> Self {
        Self {
            id,
            name,
            service_type,
        }
    }

    /// Returns the stable repository identifier.
    #[must_use]
    pub const fn id(&self) -> RepoId {
        self.id
    }

    /// Returns the repository name.
    #[must_use]
    pub const fn name(&self) -> &RepoName {
        &self.name
    }

    /// Returns the code host the repository is served from.
    #[must_use]
    pub const fn service_type(&self) -> &ServiceType {
        &self.service_type
    }
}

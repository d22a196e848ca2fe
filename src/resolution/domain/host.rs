//! Code host service types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Code-hosting platform a repository is mirrored from.
///
/// Unknown platforms are kept verbatim in [`ServiceType::Other`] so they can
/// be reported back to the user.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceType {
    /// GitHub or GitHub Enterprise.
    GitHub,
    /// GitLab.
    GitLab,
    /// Bitbucket Server / Data Center.
    BitbucketServer,
    /// Any other code host, such as `gitea` or `phabricator`.
    Other(String),
}

impl ServiceType {
    /// Returns the service type in canonical storage format.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
            Self::BitbucketServer => "bitbucketServer",
            Self::Other(value) => value,
        }
    }

    /// Returns whether batch changes can publish to this code host.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        matches!(self, Self::GitHub | Self::GitLab | Self::BitbucketServer)
    }
}

impl From<&str> for ServiceType {
    fn from(value: &str) -> Self {
        match value.trim() {
            "github" => Self::GitHub,
            "gitlab" => Self::GitLab,
            "bitbucketServer" => Self::BitbucketServer,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for ServiceType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<ServiceType> for String {
    fn from(value: ServiceType) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

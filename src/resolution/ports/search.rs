//! Streaming search port.

use crate::resolution::domain::RepoId;
use async_trait::async_trait;
use futures::stream::BoxStream;
use std::sync::Arc;
use thiserror::Error;

/// Result type for search client operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Stream of events produced by one search.
pub type SearchEventStream = BoxStream<'static, SearchEvent>;

/// A single search match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMatch {
    /// Whole-repository match.
    Repo {
        /// Matched repository.
        repository_id: RepoId,
    },
    /// File content match.
    Content {
        /// Repository containing the match.
        repository_id: RepoId,
        /// Path of the matched file.
        path: String,
    },
    /// File path match.
    Path {
        /// Matched path.
        path: String,
    },
    /// Symbol match.
    Symbol {
        /// Matched symbol name.
        name: String,
    },
    /// Commit or diff match.
    Commit {
        /// Repository name as rendered by the search backend.
        repository: String,
        /// Matched commit.
        oid: String,
    },
}

impl SearchMatch {
    /// Returns the repository identifier carried by repo and content matches.
    #[must_use]
    pub const fn repository_id(&self) -> Option<RepoId> {
        match self {
            Self::Repo { repository_id } | Self::Content { repository_id, .. } => {
                Some(*repository_id)
            }
            Self::Path { .. } | Self::Symbol { .. } | Self::Commit { .. } => None,
        }
    }
}

/// Progress counters reported while a search runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchProgress {
    /// Matches found so far.
    pub match_count: u64,
    /// Repositories searched so far.
    pub repositories_searched: u64,
    /// Whether the search has completed.
    pub done: bool,
}

/// Event emitted by a streaming search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// A batch of matches.
    Matches(Vec<SearchMatch>),
    /// Progress update.
    Progress(SearchProgress),
    /// Informational alert about the query.
    Alert {
        /// Alert title.
        title: String,
    },
    /// Terminal error reported by the search backend.
    Error {
        /// Error message.
        message: String,
    },
}

/// Executes search queries as event streams.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Starts a streaming search for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Transport`] when the search cannot be started.
    async fn stream(&self, query: &str) -> SearchResult<SearchEventStream>;
}

/// Errors returned by search client implementations.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// The search backend reported an error event.
    #[error("{0}")]
    Stream(String),

    /// The search could not be started or its stream broke.
    #[error("search transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl SearchError {
    /// Wraps a transport failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}

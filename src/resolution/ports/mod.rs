//! Port contracts for repository resolution.
//!
//! Ports define infrastructure-agnostic interfaces to the repository store,
//! the git servers and the search backend.

pub mod git;
pub mod search;
pub mod store;

pub use git::{FileKind, FileStat, GitError, GitResult, GitServer, ResolveRevisionOptions};
pub use search::{
    SearchClient, SearchError, SearchEvent, SearchEventStream, SearchMatch, SearchProgress,
    SearchResult,
};
pub use store::{RepositoryStore, RepositoryStoreError, RepositoryStoreResult};

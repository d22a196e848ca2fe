//! In-memory adapters for repository resolution ports.
//!
//! These adapters model the store, git servers and search backend without
//! any I/O and are suitable for unit and integration tests and for local
//! deterministic resolution runs.

mod git;
mod search;
mod store;

pub use git::InMemoryGitServer;
pub use search::InMemorySearchClient;
pub use store::InMemoryRepositoryStore;

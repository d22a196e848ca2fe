//! In-memory streaming search backend.

use async_trait::async_trait;
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::resolution::ports::{
    SearchClient, SearchError, SearchEvent, SearchEventStream, SearchProgress, SearchResult,
};

/// In-memory search backend replaying canned event sequences.
///
/// Events are keyed by the exact query string received, so callers register
/// them under the augmented query. Unknown queries produce an empty result.
#[derive(Debug, Clone, Default)]
pub struct InMemorySearchClient {
    state: Arc<RwLock<InMemorySearchState>>,
}

#[derive(Debug, Default)]
struct InMemorySearchState {
    responses: HashMap<String, Vec<SearchEvent>>,
    queries: Vec<String>,
}

fn lock_error(message: String) -> SearchError {
    SearchError::transport(std::io::Error::other(message))
}

impl InMemorySearchClient {
    /// Creates a backend with no canned responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the events streamed back for `query`.
    ///
    /// Existing events for the query are replaced.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn respond(
        &self,
        query: impl Into<String>,
        events: impl IntoIterator<Item = SearchEvent>,
    ) -> SearchResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(err.to_string()))?;
        state.responses.insert(query.into(), events.into_iter().collect());
        Ok(())
    }

    /// Returns every query received, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn queries(&self) -> SearchResult<Vec<String>> {
        let state = self.state.read().map_err(|err| lock_error(err.to_string()))?;
        Ok(state.queries.clone())
    }
}

#[async_trait]
impl SearchClient for InMemorySearchClient {
    async fn stream(&self, query: &str) -> SearchResult<SearchEventStream> {
        let mut state = self.state.write().map_err(|err| lock_error(err.to_string()))?;
        state.queries.push(query.to_owned());
        let mut events = state.responses.get(query).cloned().unwrap_or_default();
        events.push(SearchEvent::Progress(SearchProgress {
            done: true,
            ..SearchProgress::default()
        }));
        Ok(futures::stream::iter(events).boxed())
    }
}

use crate::storage::InMemorySessionStorage;
use crate::types::SessionId;
use itunes_catalog::Url;
use search_session::{CatalogFetcher, SearchSession, SearchState};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub(crate) enum SearchServiceError {
    #[error("Search session {0} does not exist")]
    SessionNotFound(SessionId),
}

/// Hosts one search session per connected search surface.
pub(crate) struct SearchService {
    sessions: InMemorySessionStorage,
    fetcher: Arc<dyn CatalogFetcher + Send + Sync>,
    endpoint: Url,
}

impl SearchService {
    /// Sessions left untouched for longer than `session_ttl` are dropped.
    pub(crate) fn new(
        fetcher: Arc<dyn CatalogFetcher + Send + Sync>,
        endpoint: Url,
        session_ttl: Duration,
    ) -> Self {
        Self {
            sessions: InMemorySessionStorage::new(session_ttl),
            fetcher,
            endpoint,
        }
    }

    pub(crate) fn create_session(&self) -> SessionId {
        self.evict_expired();

        let session_id = SessionId::new();
        let session = SearchSession::new(Arc::clone(&self.fetcher), self.endpoint.clone());

        self.sessions.save(session_id, session);
        info!(%session_id, "Search session created");

        session_id
    }

    /// Submits `query` and returns the state right after submission.
    pub(crate) fn submit(
        &self,
        session_id: &SessionId,
        query: &str,
    ) -> Result<SearchState, SearchServiceError> {
        let session = self.find_session(session_id)?;

        if session.submit(query).is_none() {
            debug!(%session_id, "Blank query left session unchanged");
        }

        Ok(session.state())
    }

    pub(crate) fn state(&self, session_id: &SessionId) -> Result<SearchState, SearchServiceError> {
        Ok(self.find_session(session_id)?.state())
    }

    pub(crate) fn close_session(&self, session_id: &SessionId) -> Result<(), SearchServiceError> {
        self.sessions
            .delete(session_id)
            .ok_or(SearchServiceError::SessionNotFound(*session_id))?;

        info!(%session_id, "Search session closed");

        Ok(())
    }

    pub(crate) fn sessions_count(&self) -> usize {
        self.evict_expired();
        self.sessions.len()
    }

    fn evict_expired(&self) {
        let evicted = self.sessions.evict_expired();

        if evicted > 0 {
            info!(evicted, "Expired search sessions dropped");
        }
    }

    fn find_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Arc<SearchSession>, SearchServiceError> {
        self.sessions
            .get(session_id)
            .ok_or(SearchServiceError::SessionNotFound(*session_id))
    }
}

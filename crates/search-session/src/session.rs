use crate::{CatalogFetcher, FailureReason, FetchError, RequestToken, SearchState};
use itunes_catalog::{
    parse_search_response, search_url, sort_by_name, CatalogItem, ParseError, Url,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    FetchError(#[from] FetchError),
    #[error(transparent)]
    ParseError(#[from] ParseError),
}

impl SearchError {
    pub fn reason(&self) -> FailureReason {
        match self {
            SearchError::FetchError(_) => FailureReason::NetworkError,
            SearchError::ParseError(_) => FailureReason::ParseError,
        }
    }
}

async fn perform_search(
    fetcher: &(dyn CatalogFetcher + Send + Sync),
    url: &Url,
) -> Result<Vec<CatalogItem>, SearchError> {
    let raw_json = fetcher.fetch(url).await?;
    let mut items = parse_search_response(&raw_json)?.results;

    sort_by_name(&mut items);

    Ok(items)
}

/// Lifecycle of the searches issued from one search surface.
///
/// Every submitted query moves the session to [`SearchState::Loading`] and
/// runs the fetch on a background task. When the task completes, its outcome
/// is published only if no newer query was submitted in the meantime.
/// Collaborators read the state through [`SearchSession::state`] or await
/// changes on a receiver from [`SearchSession::subscribe`].
pub struct SearchSession {
    fetcher: Arc<dyn CatalogFetcher + Send + Sync>,
    endpoint: Url,
    sequence: Arc<AtomicU64>,
    state: Arc<watch::Sender<SearchState>>,
}

impl SearchSession {
    pub fn new(fetcher: Arc<dyn CatalogFetcher + Send + Sync>, endpoint: Url) -> Self {
        let (state, _) = watch::channel(SearchState::Idle);

        Self {
            fetcher,
            endpoint,
            sequence: Arc::new(AtomicU64::new(0)),
            state: Arc::new(state),
        }
    }

    /// Starts a search for `query`. Blank queries are ignored.
    ///
    /// Must be called within a Tokio runtime. The returned handle resolves once
    /// the outcome has been published or discarded.
    pub fn submit(&self, query: &str) -> Option<JoinHandle<()>> {
        if query.trim().is_empty() {
            debug!("Ignoring blank search query");
            return None;
        }

        let query = query.to_string();
        let mut token = RequestToken::default();

        // Token and loading state change under the lock completions publish with.
        self.state.send_modify(|state| {
            token = RequestToken(self.sequence.fetch_add(1, Ordering::SeqCst) + 1);
            *state = SearchState::Loading {
                query: query.clone(),
            };
        });

        info!(%token, query = %query, "Submitting search");

        let url = search_url(&self.endpoint, &query);
        let fetcher = Arc::clone(&self.fetcher);
        let sequence = Arc::clone(&self.sequence);
        let state = Arc::clone(&self.state);

        Some(tokio::spawn(async move {
            let next_state = match perform_search(fetcher.as_ref(), &url).await {
                Ok(items) => {
                    info!(%token, results = items.len(), "Search completed");
                    SearchState::Populated { query, items }
                }
                Err(error) => {
                    error!(?error, %token, %url, "Search failed");
                    SearchState::Failed {
                        query,
                        reason: error.reason(),
                    }
                }
            };

            let published = state.send_if_modified(|current| {
                if sequence.load(Ordering::SeqCst) != *token {
                    return false;
                }

                *current = next_state;
                true
            });

            if !published {
                debug!(%token, "Discarding outcome of superseded search");
            }
        }))
    }

    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn current_token(&self) -> RequestToken {
        RequestToken(self.sequence.load(Ordering::SeqCst))
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        // Invalidates the request in flight, if any.
        self.state.send_if_modified(|_| {
            self.sequence.fetch_add(1, Ordering::SeqCst);
            false
        });
    }
}

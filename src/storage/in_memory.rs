use crate::types::SessionId;
use search_session::SearchSession;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

struct StoredSession {
    session: Arc<SearchSession>,
    last_access: Instant,
}

impl StoredSession {
    fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.last_access) > ttl
    }
}

/// Keeps sessions until they are deleted or stay idle for longer than `ttl`.
pub(crate) struct InMemorySessionStorage {
    storage: Mutex<HashMap<SessionId, StoredSession>>,
    ttl: Duration,
}

impl InMemorySessionStorage {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            storage: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, StoredSession>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn save(&self, session_id: SessionId, session: SearchSession) {
        let stored = StoredSession {
            session: Arc::new(session),
            last_access: Instant::now(),
        };

        self.lock().insert(session_id, stored);
    }

    /// Returns the session and refreshes its access time. An expired session is
    /// removed and reported as absent.
    pub(crate) fn get(&self, session_id: &SessionId) -> Option<Arc<SearchSession>> {
        let now = Instant::now();
        let mut storage = self.lock();

        if storage.get(session_id)?.is_expired(self.ttl, now) {
            storage.remove(session_id);
            return None;
        }

        storage.get_mut(session_id).map(|stored| {
            stored.last_access = now;
            Arc::clone(&stored.session)
        })
    }

    pub(crate) fn delete(&self, session_id: &SessionId) -> Option<Arc<SearchSession>> {
        self.lock().remove(session_id).map(|stored| stored.session)
    }

    /// Drops every expired session and returns how many were dropped.
    pub(crate) fn evict_expired(&self) -> usize {
        let now = Instant::now();
        let mut storage = self.lock();
        let before = storage.len();

        storage.retain(|_, stored| !stored.is_expired(self.ttl, now));

        before - storage.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }
}

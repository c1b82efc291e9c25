//! Stream session store.
//!
//! Each listing filter gets one realtime session, identified by the
//! backend's `sse_uuid`. Sessions expire after a fixed TTL; an expired
//! uuid means the consumer must re-list to obtain a fresh one.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

/// Configuration for the session store.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long a session stays valid without being refreshed
    pub ttl: Duration,
    /// Maximum number of concurrent sessions
    pub max_capacity: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(600),
            max_capacity: 1000,
        }
    }
}

/// TTL store correlating listing-filter fingerprints with stream
/// session uuids.
///
/// Both directions are kept: fingerprint to uuid for echoing an
/// existing session on follow-up pages, and uuid to fingerprint for
/// validating stream connections.
#[derive(Clone)]
pub struct SessionStore {
    by_fingerprint: Cache<String, Arc<String>>,
    by_uuid: Cache<String, Arc<String>>,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        let by_fingerprint = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.ttl)
            .build();
        let by_uuid = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.ttl)
            .build();

        Self {
            by_fingerprint,
            by_uuid,
        }
    }

    /// Record a session for a filter fingerprint, refreshing its TTL.
    pub async fn insert(&self, fingerprint: &str, session_uuid: &str) {
        self.by_fingerprint
            .insert(fingerprint.to_string(), Arc::new(session_uuid.to_string()))
            .await;
        self.by_uuid
            .insert(session_uuid.to_string(), Arc::new(fingerprint.to_string()))
            .await;
    }

    /// The live session for a filter fingerprint, if any.
    pub async fn get(&self, fingerprint: &str) -> Option<Arc<String>> {
        self.by_fingerprint.get(fingerprint).await
    }

    /// Whether a session uuid is still live.
    pub fn is_live(&self, session_uuid: &str) -> bool {
        self.by_uuid.contains_key(session_uuid)
    }

    /// Number of live sessions.
    pub fn entry_count(&self) -> u64 {
        self.by_uuid.entry_count()
    }

    /// Drop all sessions.
    pub fn invalidate_all(&self) {
        self.by_fingerprint.invalidate_all();
        self.by_uuid.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        SessionStore::new(SessionConfig::default())
    }

    #[tokio::test]
    async fn stores_and_retrieves_by_fingerprint() {
        let store = store();
        store.insert("origin=Huye", "uuid-1").await;

        let session = store.get("origin=Huye").await.unwrap();
        assert_eq!(session.as_str(), "uuid-1");
        assert!(store.get("origin=Musanze").await.is_none());
    }

    #[tokio::test]
    async fn validates_uuids() {
        let store = store();
        store.insert("origin=Huye", "uuid-1").await;

        assert!(store.is_live("uuid-1"));
        assert!(!store.is_live("uuid-2"));
    }

    #[tokio::test]
    async fn refresh_replaces_the_session() {
        let store = store();
        store.insert("origin=Huye", "uuid-1").await;
        store.insert("origin=Huye", "uuid-2").await;

        let session = store.get("origin=Huye").await.unwrap();
        assert_eq!(session.as_str(), "uuid-2");
        // The superseded uuid stays valid until its TTL lapses
        assert!(store.is_live("uuid-1"));
    }

    #[tokio::test]
    async fn expired_sessions_are_gone() {
        let store = SessionStore::new(SessionConfig {
            ttl: Duration::from_millis(20),
            max_capacity: 10,
        });
        store.insert("origin=Huye", "uuid-1").await;

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(store.get("origin=Huye").await.is_none());
        assert!(!store.is_live("uuid-1"));
    }

    #[tokio::test]
    async fn invalidate_all_clears_both_directions() {
        let store = store();
        store.insert("origin=Huye", "uuid-1").await;
        store.invalidate_all();

        assert!(store.get("origin=Huye").await.is_none());
        assert!(!store.is_live("uuid-1"));
    }
}

use crate::model::Credentials;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Cache entry for a signed-in operator
#[derive(Clone, Debug)]
struct CacheEntry {
    credentials: Credentials,
    last_accessed: Instant,
}

/// In-memory credential store keyed by opaque session tokens.
///
/// Pages carry the token instead of the password. Entries expire after
/// `ttl` without use; every successful lookup renews the entry.
#[derive(Debug, Clone)]
pub struct SessionCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

impl SessionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Store credentials and return the token that refers to them
    pub async fn create(&self, credentials: Credentials) -> String {
        let token = Uuid::new_v4().to_string();
        let mut entries = self.entries.write().await;
        entries.insert(
            token.clone(),
            CacheEntry {
                credentials,
                last_accessed: Instant::now(),
            },
        );
        token
    }

    /// Get credentials for a token if present and not expired
    pub async fn get(&self, token: &str) -> Option<Credentials> {
        let mut entries = self.entries.write().await;

        if let Some(entry) = entries.get_mut(token) {
            if entry.last_accessed.elapsed() > self.ttl {
                entries.remove(token);
                return None;
            }

            entry.last_accessed = Instant::now();
            Some(entry.credentials.clone())
        } else {
            None
        }
    }

    /// Swap the credentials behind a live token. Returns false when the
    /// token is unknown or expired.
    pub async fn replace(&self, token: &str, credentials: Credentials) -> bool {
        let mut entries = self.entries.write().await;

        match entries.get_mut(token) {
            Some(entry) if entry.last_accessed.elapsed() <= self.ttl => {
                entry.credentials = credentials;
                entry.last_accessed = Instant::now();
                true
            }
            _ => false,
        }
    }

    /// Drop every entry idle for longer than the TTL, returning how many
    pub async fn clear_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let ttl = self.ttl;
        let before = entries.len();
        entries.retain(|_, entry| entry.last_accessed.elapsed() <= ttl);
        before - entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Periodically purge expired sessions until the runtime shuts down.
pub fn spawn_purge_task(cache: SessionCache, interval: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let purged = cache.clear_expired().await;
            if purged > 0 {
                log::info!("Purged {} expired session(s)", purged);
            }
        }
    })
}

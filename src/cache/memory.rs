// ABOUTME: In-memory cache implementation with LRU eviction and TTL support
// ABOUTME: Includes optional background cleanup task for expired entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{CacheConfig, CacheKey};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// In-memory cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    data: V,
    /// `None` when the TTL reaches past the clock's range
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    fn new(data: V, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now().checked_add(ttl),
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|expires_at| Instant::now() >= expires_at)
    }
}

type Store<V> = Arc<RwLock<LruCache<CacheKey, CacheEntry<V>>>>;

/// In-memory cache with LRU eviction and optional background cleanup
///
/// Every structural change (insert, eviction, expiry removal) happens under the
/// single write lock, so concurrent resolutions never observe a torn store and a
/// completed `put` is visible to every later `get`. `LruCache::get` updates
/// recency, which is why reads take the write lock as well.
pub struct InMemoryCache<V> {
    store: Store<V>,
    ttl: Duration,
    shutdown_tx: Option<tokio::sync::mpsc::Sender<()>>,
}

impl<V> InMemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Default cache capacity when config specifies zero entries
    const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(512) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create a cache, spawning the cleanup task when the config asks for it
    ///
    /// The cleanup task is spawned on the current tokio runtime, so callers that
    /// enable it must be inside one.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        let capacity =
            NonZeroUsize::new(config.max_entries).unwrap_or(Self::DEFAULT_CACHE_CAPACITY);
        let store: Store<V> = Arc::new(RwLock::new(LruCache::new(capacity)));

        let shutdown_tx = if config.enable_background_cleanup {
            let (shutdown_tx, mut shutdown_rx) = tokio::sync::mpsc::channel::<()>(1);
            let store_clone = store.clone();
            let cleanup_interval = config.cleanup_interval;

            tokio::spawn(async move {
                let mut interval = tokio::time::interval(cleanup_interval);
                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            Self::cleanup_expired(&store_clone).await;
                        }
                        _ = shutdown_rx.recv() => {
                            tracing::debug!("Cache cleanup task received shutdown signal");
                            break;
                        }
                    }
                }
            });

            Some(shutdown_tx)
        } else {
            None
        };

        Self {
            store,
            ttl: config.ttl,
            shutdown_tx,
        }
    }

    /// Remove all expired entries from cache
    async fn cleanup_expired(store: &Store<V>) {
        let mut store_guard = store.write().await;

        // Collect expired keys first (can't modify while iterating)
        let expired_keys: Vec<CacheKey> = store_guard
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            store_guard.pop(key);
        }
        drop(store_guard);

        if !expired_keys.is_empty() {
            tracing::debug!("Cleaned up {} expired cache entries", expired_keys.len());
        }
    }

    /// Look up a live entry; expired entries are removed and reported as absent
    pub async fn get(&self, key: &CacheKey) -> Option<V> {
        let mut store = self.store.write().await;

        let expired = match store.get(key) {
            Some(entry) if !entry.is_expired() => return Some(entry.data.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            store.pop(key);
        }
        None
    }

    /// Insert or replace an entry; its TTL starts now
    pub async fn put(&self, key: CacheKey, value: V) {
        let entry = CacheEntry::new(value, self.ttl);

        // LruCache evicts the least-recently-used entry when full
        if let Some((evicted, _)) = self.store.write().await.push(key.clone(), entry) {
            if evicted != key {
                tracing::debug!(key = %evicted, "Evicted least-recently-used cache entry");
            }
        }
    }

    /// Number of stored entries, including expired ones not yet swept
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Whether the cache holds no entries
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Drop every entry
    pub async fn clear(&self) {
        self.store.write().await.clear();
    }

    /// Configured entry lifetime
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<V> Drop for InMemoryCache<V> {
    fn drop(&mut self) {
        if let Some(tx) = &self.shutdown_tx {
            if let Err(e) = tx.try_send(()) {
                tracing::debug!(error = ?e, "Cache shutdown signal send failed (channel likely closed)");
            }
        }
    }
}

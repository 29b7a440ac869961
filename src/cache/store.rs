//! Cache Store Module
//!
//! Generic TTL store: a HashMap behind a single async RwLock plus lock-free counters.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::cache::{CacheEntry, CacheStats, StatsCounters};

// == Cache Store ==
/// Thread-safe key/value storage with per-entry TTL.
///
/// Values are cloned out on read; the store never hands out references into
/// the table, so a reader can never observe a half-written entry.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    /// Cumulative statistics
    stats: StatsCounters,
}

impl<V> Default for CacheStore<V> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stats: StatsCounters::new(),
        }
    }
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Retrieves a live value by key.
    ///
    /// An expired entry counts as a miss and an expiration, and is removed.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.get_map(key, |value| Some(value.clone())).await
    }

    /// Retrieves a live value by key and projects it through `extract`.
    ///
    /// Counts a hit only when `extract` accepts the value. A rejected value
    /// counts as a miss and is left in place for the next `set` to replace.
    pub async fn get_map<T, F>(&self, key: &str, extract: F) -> Option<T>
    where
        F: FnOnce(&V) -> Option<T>,
    {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => {
                    self.stats.record_miss();
                    return None;
                }
                Some(entry) if !entry.is_expired() => {
                    return self.project(&entry.value, extract);
                }
                Some(_) => {}
            }
        }

        // Expired under the read lock; re-check under the write lock since a
        // concurrent set or the reaper may have touched the key in between.
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                self.stats.record_expirations(1);
                self.stats.record_miss();
                None
            }
            Some(entry) => self.project(&entry.value, extract),
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    fn project<T>(&self, value: &V, extract: impl FnOnce(&V) -> Option<T>) -> Option<T> {
        let projected = extract(value);
        if projected.is_some() {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        projected
    }

    // == Set ==
    /// Stores a value expiring `ttl` from now, replacing any existing entry.
    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = CacheEntry::new(value, ttl);
        self.entries.write().await.insert(key.into(), entry);
        self.stats.record_set();
    }
}

impl<V> CacheStore<V> {
    // == Delete ==
    /// Removes an entry by key. Returns true if something was removed.
    pub async fn delete(&self, key: &str) -> bool {
        let removed = self.entries.write().await.remove(key).is_some();
        if removed {
            self.stats.record_deletes(1);
        }
        removed
    }

    // == Invalidate Prefix ==
    /// Removes every entry whose key starts with `prefix`.
    ///
    /// Returns the number of entries removed; each counts as a delete.
    pub async fn invalidate_prefix(&self, prefix: &str) -> usize {
        self.invalidate::<&str, &str>(&[], &[prefix]).await
    }

    // == Invalidate ==
    /// Removes the given keys and every key under the given prefixes in one
    /// write-lock acquisition.
    ///
    /// Returns the number of entries removed; each counts as a delete.
    pub async fn invalidate<K, P>(&self, keys: &[K], prefixes: &[P]) -> usize
    where
        K: AsRef<str> + Sync,
        P: AsRef<str> + Sync,
    {
        let removed = {
            let mut entries = self.entries.write().await;
            let before = entries.len();
            for key in keys {
                entries.remove(key.as_ref());
            }
            if !prefixes.is_empty() {
                entries.retain(|key, _| {
                    !prefixes.iter().any(|prefix| key.starts_with(prefix.as_ref()))
                });
            }
            before - entries.len()
        };
        self.stats.record_deletes(removed as u64);
        removed
    }

    // == Clear ==
    /// Removes all entries. Cumulative counters are kept.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    // == Contains Key ==
    /// Reports whether a live entry exists, without touching statistics.
    pub async fn contains_key(&self, key: &str) -> bool {
        self.entries
            .read()
            .await
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    // == Size ==
    /// Returns the number of stored entries, expired-but-unreaped included.
    pub async fn size(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of the counters and the current size.
    pub async fn stats(&self) -> CacheStats {
        let size = self.size().await;
        self.stats.snapshot(size)
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let removed = {
            let mut entries = self.entries.write().await;
            let now = tokio::time::Instant::now();
            let before = entries.len();
            entries.retain(|_, entry| !entry.is_expired_at(now));
            before - entries.len()
        };
        self.stats.record_expirations(removed as u64);
        removed
    }
}

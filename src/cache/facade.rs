//! Cache Facade Module
//!
//! Typed cache operations per derived-data kind on top of [`CacheStore`],
//! with default TTLs and cascading invalidation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::{CacheKey, CacheStats, CacheStore, Namespace};
use crate::config::CacheConfig;
use crate::models::{Banner, BannerClickCount, BannerWithStats, ClickStats};
use crate::tasks::{spawn_cleanup_task, ReaperHandle};

// == Cached Value ==
/// Envelope for every value kind the facade stores.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Banner(Banner),
    ClickStats(ClickStats),
    BannerWithStats(BannerWithStats),
    TopBanners(Vec<BannerClickCount>),
}

impl CachedValue {
    pub fn kind(&self) -> &'static str {
        match self {
            CachedValue::Banner(_) => "banner",
            CachedValue::ClickStats(_) => "click_stats",
            CachedValue::BannerWithStats(_) => "banner_stats",
            CachedValue::TopBanners(_) => "top_banners",
        }
    }

    fn as_banner(&self) -> Option<Banner> {
        match self {
            CachedValue::Banner(banner) => Some(banner.clone()),
            _ => None,
        }
    }

    fn as_click_stats(&self) -> Option<ClickStats> {
        match self {
            CachedValue::ClickStats(stats) => Some(stats.clone()),
            _ => None,
        }
    }

    fn as_banner_with_stats(&self) -> Option<BannerWithStats> {
        match self {
            CachedValue::BannerWithStats(stats) => Some(stats.clone()),
            _ => None,
        }
    }

    fn as_top_banners(&self) -> Option<Vec<BannerClickCount>> {
        match self {
            CachedValue::TopBanners(banners) => Some(banners.clone()),
            _ => None,
        }
    }
}

// == Cache Trait ==
/// Typed cache capability used by the cached repository.
///
/// `set_*` operations take an optional TTL; `None` selects the kind's
/// configured default.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get_banner(&self, id: i64) -> Option<Banner>;
    async fn set_banner(&self, banner: &Banner, ttl: Option<Duration>);
    /// Removes only the banner entry itself.
    async fn delete_banner(&self, id: i64);
    /// Removes the banner, everything derived from it, and all rankings.
    async fn invalidate_banner(&self, id: i64);

    async fn get_click_stats(&self, banner_id: i64) -> Option<ClickStats>;
    async fn set_click_stats(&self, banner_id: i64, stats: &ClickStats, ttl: Option<Duration>);
    /// Removes click stats and banner-with-stats for the banner, and all
    /// rankings. The banner entry is kept.
    async fn invalidate_click_stats(&self, banner_id: i64);

    async fn get_banner_with_stats(&self, id: i64) -> Option<BannerWithStats>;
    async fn set_banner_with_stats(&self, id: i64, value: &BannerWithStats, ttl: Option<Duration>);
    async fn invalidate_banner_with_stats(&self, id: i64);

    async fn get_top_banners(&self, limit: usize) -> Option<Vec<BannerClickCount>>;
    async fn set_top_banners(&self, limit: usize, banners: &[BannerClickCount], ttl: Option<Duration>);
    /// Removes the rankings for every limit.
    async fn invalidate_top_banners(&self);

    /// Removes all entries; cumulative statistics are kept.
    async fn clear(&self);
    async fn size(&self) -> usize;
    async fn stats(&self) -> CacheStats;
    /// Stops background maintenance. Later calls are no-ops.
    async fn stop(&self);
}

// == In-Memory Cache ==
/// [`Cache`] backed by a local [`CacheStore`] and its reaper.
#[derive(Debug)]
pub struct InMemoryCache {
    store: Arc<CacheStore<CachedValue>>,
    config: CacheConfig,
    reaper: Mutex<Option<ReaperHandle>>,
}

impl InMemoryCache {
    /// Creates a cache without a running reaper.
    ///
    /// Expired entries are then only dropped when they are read.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            store: Arc::new(CacheStore::new()),
            config,
            reaper: Mutex::new(None),
        }
    }

    /// Creates a cache and starts its reaper. Must be called within a tokio runtime.
    pub fn start(config: CacheConfig) -> Self {
        let store = Arc::new(CacheStore::new());
        let reaper = spawn_cleanup_task(store.clone(), config.cleanup_interval);

        Self {
            store,
            config,
            reaper: Mutex::new(Some(reaper)),
        }
    }

    /// Underlying untyped store.
    pub fn store(&self) -> &Arc<CacheStore<CachedValue>> {
        &self.store
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns true while a reaper is attached and running.
    pub async fn reaper_running(&self) -> bool {
        self.reaper
            .lock()
            .await
            .as_ref()
            .is_some_and(|reaper| !reaper.is_finished())
    }

    async fn lookup<T>(&self, key: CacheKey, extract: fn(&CachedValue) -> Option<T>) -> Option<T> {
        self.store
            .get_map(&key.to_string(), |value| {
                let typed = extract(value);
                if typed.is_none() {
                    // Left in place: the read-through that follows overwrites it.
                    warn!(
                        key = %key,
                        found = value.kind(),
                        "Cached value has unexpected type, treating as miss"
                    );
                }
                typed
            })
            .await
    }

    async fn put(&self, key: CacheKey, value: CachedValue, ttl: Duration) {
        self.store.set(key, value, ttl).await;
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    // == Banner ==
    async fn get_banner(&self, id: i64) -> Option<Banner> {
        self.lookup(CacheKey::banner(id), CachedValue::as_banner).await
    }

    async fn set_banner(&self, banner: &Banner, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.config.banner_ttl);
        self.put(CacheKey::banner(banner.id), CachedValue::Banner(banner.clone()), ttl)
            .await;
    }

    async fn delete_banner(&self, id: i64) {
        self.store.delete(&CacheKey::banner(id).to_string()).await;
    }

    async fn invalidate_banner(&self, id: i64) {
        let keys = [
            CacheKey::banner(id).to_string(),
            CacheKey::click_stats(id).to_string(),
            CacheKey::banner_stats(id).to_string(),
        ];
        let removed = self
            .store
            .invalidate(&keys, &[Namespace::TopBanners.prefix()])
            .await;
        debug!(banner_id = id, removed, "Invalidated banner cache entries");
    }

    // == Click Stats ==
    async fn get_click_stats(&self, banner_id: i64) -> Option<ClickStats> {
        self.lookup(CacheKey::click_stats(banner_id), CachedValue::as_click_stats)
            .await
    }

    async fn set_click_stats(&self, banner_id: i64, stats: &ClickStats, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.config.click_stats_ttl);
        self.put(
            CacheKey::click_stats(banner_id),
            CachedValue::ClickStats(stats.clone()),
            ttl,
        )
        .await;
    }

    async fn invalidate_click_stats(&self, banner_id: i64) {
        let keys = [
            CacheKey::click_stats(banner_id).to_string(),
            CacheKey::banner_stats(banner_id).to_string(),
        ];
        let removed = self
            .store
            .invalidate(&keys, &[Namespace::TopBanners.prefix()])
            .await;
        debug!(banner_id, removed, "Invalidated click statistics cache entries");
    }

    // == Banner With Stats ==
    async fn get_banner_with_stats(&self, id: i64) -> Option<BannerWithStats> {
        self.lookup(CacheKey::banner_stats(id), CachedValue::as_banner_with_stats)
            .await
    }

    async fn set_banner_with_stats(&self, id: i64, value: &BannerWithStats, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.config.banner_stats_ttl);
        self.put(
            CacheKey::banner_stats(id),
            CachedValue::BannerWithStats(value.clone()),
            ttl,
        )
        .await;
    }

    async fn invalidate_banner_with_stats(&self, id: i64) {
        self.store.delete(&CacheKey::banner_stats(id).to_string()).await;
    }

    // == Top Banners ==
    async fn get_top_banners(&self, limit: usize) -> Option<Vec<BannerClickCount>> {
        self.lookup(CacheKey::top_banners(limit), CachedValue::as_top_banners)
            .await
    }

    async fn set_top_banners(&self, limit: usize, banners: &[BannerClickCount], ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.config.top_banners_ttl);
        self.put(
            CacheKey::top_banners(limit),
            CachedValue::TopBanners(banners.to_vec()),
            ttl,
        )
        .await;
    }

    async fn invalidate_top_banners(&self) {
        let removed = self
            .store
            .invalidate_prefix(&Namespace::TopBanners.prefix())
            .await;
        debug!(removed, "Invalidated top banners cache entries");
    }

    // == Management ==
    async fn clear(&self) {
        self.store.clear().await;
    }

    async fn size(&self) -> usize {
        self.store.size().await
    }

    async fn stats(&self) -> CacheStats {
        self.store.stats().await
    }

    async fn stop(&self) {
        let reaper = self.reaper.lock().await.take();
        if let Some(reaper) = reaper {
            reaper.stop().await;
        }
    }
}

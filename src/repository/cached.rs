//! Cached banner repository
//!
//! Decorates a [`BannerRepository`] with read-through caching of single
//! banners, click statistics, banner-with-stats views and top-banner
//! rankings. Writes go to the backing store first; the cache is populated or
//! invalidated only after the write succeeded.
//!
//! Listings, searches, range queries and lookups by non-id keys bypass the
//! cache.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::cache::{Cache, CacheStats};
use crate::config::DEFAULT_WARM_TOP_LIMIT;
use crate::error::Result;
use crate::models::{
    Banner, BannerClickCount, BannerWithStats, Click, ClickStats, DailyClicks, HourlyClicks,
    NewClick,
};
use crate::repository::BannerRepository;

/// What a cache warm-up managed to load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarmSummary {
    /// Banners cached
    pub banners: usize,
    /// Click statistics cached
    pub click_stats: usize,
    /// Whether the top-banners ranking was cached
    pub top_banners: bool,
}

// == Cached Banner Repository ==
/// Drop-in [`BannerRepository`] that caches selected reads.
#[derive(Clone)]
pub struct CachedBannerRepository {
    repo: Arc<dyn BannerRepository>,
    cache: Arc<dyn Cache>,
    warm_top_limit: usize,
}

impl CachedBannerRepository {
    pub fn new(repo: Arc<dyn BannerRepository>, cache: Arc<dyn Cache>) -> Self {
        Self {
            repo,
            cache,
            warm_top_limit: DEFAULT_WARM_TOP_LIMIT,
        }
    }

    /// Sets the ranking size preloaded by [`warm_cache`](Self::warm_cache).
    pub fn with_warm_top_limit(mut self, limit: usize) -> Self {
        self.warm_top_limit = limit;
        self
    }

    pub fn cache(&self) -> &Arc<dyn Cache> {
        &self.cache
    }

    // == Cache Management ==
    /// Snapshot of cache statistics.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Drops every cached entry.
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
        info!("Cache cleared");
    }

    /// Drops everything cached for a banner, plus all rankings.
    pub async fn invalidate_banner_cache(&self, banner_id: i64) {
        self.cache.invalidate_banner(banner_id).await;
    }

    /// Preloads all banners, their click statistics and one ranking.
    ///
    /// Fails only if the banner list cannot be loaded. Statistics or the
    /// ranking failing to load are logged and skipped.
    pub async fn warm_cache(&self) -> Result<WarmSummary> {
        let banners = self.repo.get_all_banners().await?;

        for banner in &banners {
            self.cache.set_banner(banner, None).await;
        }

        let mut summary = WarmSummary {
            banners: banners.len(),
            ..WarmSummary::default()
        };

        for banner in &banners {
            match self.repo.get_click_stats(banner.id).await {
                Ok(stats) => {
                    self.cache.set_click_stats(banner.id, &stats, None).await;
                    summary.click_stats += 1;
                }
                Err(err) => {
                    warn!(banner_id = banner.id, error = %err, "Skipping click stats during cache warm");
                }
            }
        }

        match self.repo.get_top_banners(self.warm_top_limit).await {
            Ok(top) => {
                self.cache
                    .set_top_banners(self.warm_top_limit, &top, None)
                    .await;
                summary.top_banners = true;
            }
            Err(err) => {
                warn!(limit = self.warm_top_limit, error = %err, "Skipping top banners during cache warm");
            }
        }

        info!(
            banners = summary.banners,
            click_stats = summary.click_stats,
            top_banners = summary.top_banners,
            "Cache warmed"
        );
        Ok(summary)
    }
}

#[async_trait]
impl BannerRepository for CachedBannerRepository {
    // == Banners ==
    async fn create_banner(&self, name: &str) -> Result<Banner> {
        let banner = self.repo.create_banner(name).await?;

        self.cache.set_banner(&banner, None).await;
        // A new banner can enter any ranking.
        self.cache.invalidate_top_banners().await;

        Ok(banner)
    }

    async fn get_banner(&self, id: i64) -> Result<Banner> {
        if let Some(banner) = self.cache.get_banner(id).await {
            debug!(banner_id = id, "Banner cache hit");
            return Ok(banner);
        }

        debug!(banner_id = id, "Banner cache miss");
        let banner = self.repo.get_banner(id).await?;
        self.cache.set_banner(&banner, None).await;
        Ok(banner)
    }

    async fn get_all_banners(&self) -> Result<Vec<Banner>> {
        self.repo.get_all_banners().await
    }

    async fn update_banner(&self, banner: &Banner) -> Result<Banner> {
        let stored = self.repo.update_banner(banner).await?;

        self.cache.set_banner(&stored, None).await;
        self.cache.invalidate_click_stats(stored.id).await;

        Ok(stored)
    }

    async fn delete_banner(&self, id: i64) -> Result<()> {
        self.repo.delete_banner(id).await?;
        self.cache.invalidate_banner(id).await;
        Ok(())
    }

    async fn get_banner_by_name(&self, name: &str) -> Result<Banner> {
        self.repo.get_banner_by_name(name).await
    }

    async fn search_banners(&self, pattern: &str) -> Result<Vec<Banner>> {
        self.repo.search_banners(pattern).await
    }

    async fn get_banners_with_click_count(&self) -> Result<Vec<BannerWithStats>> {
        self.repo.get_banners_with_click_count().await
    }

    async fn get_banner_with_stats(&self, id: i64) -> Result<BannerWithStats> {
        if let Some(view) = self.cache.get_banner_with_stats(id).await {
            debug!(banner_id = id, "Banner stats cache hit");
            return Ok(view);
        }

        debug!(banner_id = id, "Banner stats cache miss");
        let view = self.repo.get_banner_with_stats(id).await?;
        self.cache.set_banner_with_stats(id, &view, None).await;
        Ok(view)
    }

    // == Clicks ==
    async fn create_click(&self, click: NewClick) -> Result<Click> {
        let click = self.repo.create_click(click).await?;
        // The banner row itself is unchanged; only derived counts move.
        self.cache.invalidate_click_stats(click.banner_id).await;
        Ok(click)
    }

    async fn get_click(&self, id: i64) -> Result<Click> {
        self.repo.get_click(id).await
    }

    async fn get_all_clicks(&self) -> Result<Vec<Click>> {
        self.repo.get_all_clicks().await
    }

    async fn get_clicks_by_banner(&self, banner_id: i64) -> Result<Vec<Click>> {
        self.repo.get_clicks_by_banner(banner_id).await
    }

    async fn get_clicks_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Click>> {
        self.repo.get_clicks_by_date_range(start, end).await
    }

    async fn get_clicks_by_banner_and_date_range(
        &self,
        banner_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Click>> {
        self.repo
            .get_clicks_by_banner_and_date_range(banner_id, start, end)
            .await
    }

    async fn delete_click(&self, id: i64) -> Result<()> {
        // Owner comes from the backing store, never from a possibly stale cache.
        let click = self.repo.get_click(id).await?;
        self.repo.delete_click(id).await?;
        self.cache.invalidate_click_stats(click.banner_id).await;
        Ok(())
    }

    // == Statistics ==
    async fn get_click_stats(&self, banner_id: i64) -> Result<ClickStats> {
        if let Some(stats) = self.cache.get_click_stats(banner_id).await {
            debug!(banner_id, "Click stats cache hit");
            return Ok(stats);
        }

        debug!(banner_id, "Click stats cache miss");
        let stats = self.repo.get_click_stats(banner_id).await?;
        self.cache.set_click_stats(banner_id, &stats, None).await;
        Ok(stats)
    }

    async fn get_top_banners(&self, limit: usize) -> Result<Vec<BannerClickCount>> {
        if let Some(top) = self.cache.get_top_banners(limit).await {
            debug!(limit, "Top banners cache hit");
            return Ok(top);
        }

        debug!(limit, "Top banners cache miss");
        let top = self.repo.get_top_banners(limit).await?;
        self.cache.set_top_banners(limit, &top, None).await;
        Ok(top)
    }

    async fn get_clicks_by_hour(&self, banner_id: i64, date: NaiveDate) -> Result<Vec<HourlyClicks>> {
        self.repo.get_clicks_by_hour(banner_id, date).await
    }

    async fn get_clicks_by_day(
        &self,
        banner_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyClicks>> {
        self.repo.get_clicks_by_day(banner_id, start, end).await
    }
}

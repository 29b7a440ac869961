//! Repository Module
//!
//! The persistence contract for banners and clicks, an in-process backing
//! implementation, and the caching decorator.

mod cached;
mod memory;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::Result;
use crate::models::{
    Banner, BannerClickCount, BannerWithStats, Click, ClickStats, DailyClicks, HourlyClicks,
    NewClick,
};

pub use cached::{CachedBannerRepository, WarmSummary};
pub use memory::InMemoryBannerRepository;

/// Persistence operations for banners and their clicks.
///
/// Implementations report a missing record as [`RepositoryError::NotFound`]
/// and any other failure as [`RepositoryError::Backend`].
///
/// [`RepositoryError::NotFound`]: crate::error::RepositoryError::NotFound
/// [`RepositoryError::Backend`]: crate::error::RepositoryError::Backend
#[async_trait]
pub trait BannerRepository: Send + Sync {
    // == Banners ==
    /// Creates a banner and returns it with its generated id.
    async fn create_banner(&self, name: &str) -> Result<Banner>;
    async fn get_banner(&self, id: i64) -> Result<Banner>;
    async fn get_all_banners(&self) -> Result<Vec<Banner>>;
    /// Renames a banner and returns the stored record.
    async fn update_banner(&self, banner: &Banner) -> Result<Banner>;
    async fn delete_banner(&self, id: i64) -> Result<()>;
    async fn get_banner_by_name(&self, name: &str) -> Result<Banner>;
    /// Case-insensitive substring match on the name.
    async fn search_banners(&self, pattern: &str) -> Result<Vec<Banner>>;
    async fn get_banners_with_click_count(&self) -> Result<Vec<BannerWithStats>>;
    async fn get_banner_with_stats(&self, id: i64) -> Result<BannerWithStats>;

    // == Clicks ==
    async fn create_click(&self, click: NewClick) -> Result<Click>;
    async fn get_click(&self, id: i64) -> Result<Click>;
    async fn get_all_clicks(&self) -> Result<Vec<Click>>;
    async fn get_clicks_by_banner(&self, banner_id: i64) -> Result<Vec<Click>>;
    /// Clicks with `start <= timestamp <= end`.
    async fn get_clicks_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Click>>;
    async fn get_clicks_by_banner_and_date_range(
        &self,
        banner_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Click>>;
    async fn delete_click(&self, id: i64) -> Result<()>;

    // == Statistics ==
    async fn get_click_stats(&self, banner_id: i64) -> Result<ClickStats>;
    /// Banners ranked by click count, descending, ties by name.
    async fn get_top_banners(&self, limit: usize) -> Result<Vec<BannerClickCount>>;
    async fn get_clicks_by_hour(&self, banner_id: i64, date: NaiveDate) -> Result<Vec<HourlyClicks>>;
    async fn get_clicks_by_day(
        &self,
        banner_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyClicks>>;
}
